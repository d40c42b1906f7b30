//! Pages a mock speaker end to end: an `httpmock` server stands in for the device,
//! verifying the signed header contract before acknowledging the tone command.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use algo_speaker_client::{auth::SharedSecret, client::SpeakerClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let tone_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/controls/tone/start")
				.header("Content-Type", "application/json")
				.header("Content-MD5", "af71f480653187e74bb34edc0c737357")
				.header_matches("Authorization", "^hmac admin:[1-9][0-9]{5}:[0-9a-f]{64}$")
				.body("{\"path\":\"page-notif.wav\",\"loop\":false}");
			then.status(200).body("Success");
		})
		.await;
	let client = SpeakerClient::connect(&server.base_url(), SharedSecret::new("algo")?)?;
	let outcome = client.play_tone("page-notif.wav", false, None).await?;

	println!("Speaker accepted the page: {} ({}).", outcome.success, outcome.body);

	tone_mock.assert_async().await;

	Ok(())
}
