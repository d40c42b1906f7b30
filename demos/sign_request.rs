//! Walks through signing a settings read and a tone command offline, printing the
//! freshness parameters and header values a transport would attach.

// crates.io
use color_eyre::Result;
use serde::Serialize;
// self
use algo_speaker_client::{
	auth::SharedSecret,
	signer::{RequestSigner, RequestUri, SigningRequest},
};

#[derive(Serialize)]
struct Tone<'a> {
	path: &'a str,
	r#loop: bool,
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let signer = RequestSigner::new(SharedSecret::new("algo")?);
	let request = SigningRequest::new(
		"GET".parse()?,
		RequestUri::new("/api/settings/device.info")?,
	);
	let signed = signer.sign(&request)?;

	println!("GET request auth:");
	println!("  Nonce: {}", signed.nonce);
	println!("  Digest: {}", signed.auth_digest);
	println!("  Date: {}", signed.date);
	println!("  Authorization: {}", signed.authorization);

	let request = SigningRequest::new("POST".parse()?, RequestUri::new("/api/controls/tone/start")?)
		.with_payload(&Tone { path: "page-notif.wav", r#loop: false })?;
	let signed = signer.sign(&request)?;

	println!("\nPOST request auth:");
	println!("  Content-MD5: {}", signed.content_digest.as_deref().unwrap_or_default());
	println!("  Signing string: {}", signed.signing_string);
	println!("  Authorization: {}", signed.authorization);

	Ok(())
}
