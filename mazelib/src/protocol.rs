use serde::{Deserialize, Serialize};

use crate::grid::Survey;

/// Wire envelope for every server response. Exactly one of the three
/// shapes is meaningful per reply: a survey, a victory message, or a
/// rejection message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub survey: Survey,
    #[serde(default)]
    pub victory: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: bool,
}

impl Reply {
    pub fn ok(survey: Survey) -> Reply {
        Reply {
            survey,
            ..Reply::default()
        }
    }

    pub fn victory(message: String) -> Reply {
        Reply {
            victory: true,
            message,
            ..Reply::default()
        }
    }

    pub fn rejection(message: String) -> Reply {
        Reply {
            error: true,
            message,
            ..Reply::default()
        }
    }
}
