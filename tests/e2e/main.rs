// End-to-end tests for the PDF to speech pipeline
//
// The Google Text-to-Speech and OAuth endpoints are replaced by httpmock
// servers; PDF fixtures live in tests/fixtures.

mod helpers;
mod test_convert;
mod test_google_tts;
