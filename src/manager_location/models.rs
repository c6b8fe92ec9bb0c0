use serde::Deserialize;

/// Subset of the ipinfo.io response
#[derive(Deserialize)]
pub struct IpInfo {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub loc: Option<String>,
    #[serde(default)]
    pub bogon: bool,
}
