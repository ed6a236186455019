use std::{fmt, str::FromStr};

use crate::error::Error;

/// The organization/environment pair a target server is created under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub organization: String,
    pub environment: String,
}

impl Scope {
    pub fn new(organization: &str, environment: &str) -> Result<Self, Error> {
        if !is_segment(organization) || !is_segment(environment) {
            return Err(Error::InvalidScope(format!(
                "organizations/{}/environments/{}",
                organization, environment
            )));
        }

        Ok(Self {
            organization: organization.to_owned(),
            environment: environment.to_owned(),
        })
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "organizations/{}/environments/{}",
            self.organization, self.environment
        )
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<&str>>().as_slice() {
            ["organizations", org, "environments", env] => Scope::new(org, env),
            _ => Err(Error::InvalidScope(s.to_owned())),
        }
    }
}

/// Apigee organization and environment names: ASCII letters, digits, `-`, `_`
fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
