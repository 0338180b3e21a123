use serde::{Deserialize, Serialize};

/// Public addressing and provider identity of this host. All five fields come
/// from external lookups and stand or fall together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub ipv4: String,
    pub ipv6: String,
    pub location: String,
    pub isp: String,
    pub timezone: String,
}

/// Body of the geolocation endpoint. A response missing any of these fields
/// is treated as malformed and fails the whole probe.
#[derive(Debug, Deserialize)]
pub struct GeoResponse {
    pub city: String,
    pub region: String,
    pub country_name: String,
    pub org: String,
    pub timezone: String,
}

impl GeoResponse {
    pub fn location(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_response_formats_location() {
        let body = r#"{
            "ip": "203.0.113.5",
            "city": "Lyon",
            "region": "Auvergne-Rhone-Alpes",
            "country_name": "France",
            "org": "EXAMPLE-ISP SAS",
            "timezone": "Europe/Paris"
        }"#;
        let geo: GeoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(geo.location(), "Lyon, Auvergne-Rhone-Alpes, France");
        assert_eq!(geo.org, "EXAMPLE-ISP SAS");
    }

    #[test]
    fn geo_response_rejects_missing_fields() {
        let body = r#"{"city": "Lyon"}"#;
        assert!(serde_json::from_str::<GeoResponse>(body).is_err());
    }
}
