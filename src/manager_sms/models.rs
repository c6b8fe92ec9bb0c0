use serde::Deserialize;

#[derive(Deserialize)]
pub struct MessageResource {
    pub sid: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct TwilioError {
    pub code: Option<u32>,
    pub message: String,
}
