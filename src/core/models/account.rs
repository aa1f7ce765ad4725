use serde::Serialize;

/// A Business Manager: the grouping entity that owns ad accounts, tied to
/// the access token that can enumerate them.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessManager {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub access_token: String,
}

/// A billable ad account. The owning Business Manager's name is denormalized
/// here so alerts can mention it without a lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub business_name: String,
    #[serde(skip_serializing)]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_skips_access_token() {
        let account = Account {
            id: "act_1".into(),
            name: "Main".into(),
            business_name: "Acme".into(),
            access_token: "secret".into(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("act_1"));
        assert!(json.contains("Acme"));
    }
}
