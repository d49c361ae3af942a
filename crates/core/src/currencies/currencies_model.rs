use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub country: String,
    pub active: bool,
}

impl Currency {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            country: country.into(),
            active,
        }
    }
}
