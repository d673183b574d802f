// demos/sign_and_verify.rs

use zelid_auth::{build_auth_header, crypto::PrivateKey, sign_message, verify_message, BITCOIN};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("zelid-auth Sign & Verify Example");

    // 1. A well-known test key; never use it for real funds
    let wif = "L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ";
    let public_key = PrivateKey::from_wif(wif, &BITCOIN)?.public_key_bytes(true);
    println!("Public key: {}", hex::encode(&public_key));

    // 2. Sign a login phrase as the verification service would issue it
    let login_phrase = "1700000000000demo";
    let signature = sign_message(login_phrase, wif)?;
    println!("Signature: {}", signature);

    // 3. Check it the way the service does
    verify_message(login_phrase, &signature, &public_key)?;
    println!("Signature verifies against the public key");

    // 4. The header the service accepts once /id/verifylogin reports success
    let header = build_auth_header("1ZelIdDemo", &signature.to_base64(), login_phrase);
    println!("Header: {}", header);

    // 5. A broken key is a typed error, not a panic
    match sign_message(login_phrase, "not-a-wif") {
        Ok(_) => println!("Unexpectedly signed with a broken key"),
        Err(e) => println!("Rejected broken key: {}", e),
    }

    Ok(())
}
