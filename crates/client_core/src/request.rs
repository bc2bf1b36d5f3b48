//! Request shapes and the form-to-request translation.

use shared::protocol::{DEFAULT_PATH, LENGTH_PARAM, MAX_PARAM, MIN_PARAM, RANDOM_PATH};
use url::form_urlencoded;

use crate::error::RequestError;

/// Raw values of the custom request form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomForm {
    pub length: String,
    pub min: String,
    pub max: String,
}

impl CustomForm {
    pub fn new(
        length: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self {
            length: length.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRequest {
    pub length: String,
    pub range: Option<RangeBounds>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomRequest {
    /// 256 random bits from the service root.
    Default,
    Custom(CustomRequest),
}

impl RandomRequest {
    /// Builds a custom request from form input.
    ///
    /// `length` must be non-blank; its content is left for the service to
    /// judge. The range is attached only when both bounds are filled in, a
    /// single bound is dropped.
    pub fn from_form(form: &CustomForm) -> Result<Self, RequestError> {
        let length = form.length.trim();
        if length.is_empty() {
            return Err(RequestError::Validation("bit length is required".to_string()));
        }

        let min = form.min.trim();
        let max = form.max.trim();
        let range = match (min.is_empty(), max.is_empty()) {
            (false, false) => Some(RangeBounds {
                min: min.to_string(),
                max: max.to_string(),
            }),
            (true, true) => None,
            _ => {
                tracing::debug!(
                    min = min,
                    max = max,
                    "only one range bound supplied; sending unbounded request"
                );
                None
            }
        };

        Ok(Self::Custom(CustomRequest {
            length: length.to_string(),
            range,
        }))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom(CustomRequest { range: None, .. }) => "custom",
            Self::Custom(CustomRequest { range: Some(_), .. }) => "custom_bounded",
        }
    }

    pub fn path_and_query(&self) -> String {
        match self {
            Self::Default => DEFAULT_PATH.to_string(),
            Self::Custom(custom) => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                query.append_pair(LENGTH_PARAM, &custom.length);
                if let Some(range) = &custom.range {
                    query.append_pair(MIN_PARAM, &range.min);
                    query.append_pair(MAX_PARAM, &range.max);
                }
                format!("{RANDOM_PATH}?{}", query.finish())
            }
        }
    }

    /// Joins the configured base with this request's path. The base is used
    /// as given apart from a trailing slash.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path_and_query())
    }
}
