//! Host invocation surface: method name plus positional arguments in, result
//! or error message out.

use std::str::FromStr;

use exn::ResultExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::Catalog;
use crate::error::{ErrorKind, Result};
use crate::lists::{list_countries, list_genres, list_years};
use crate::models::{DiscoverRequest, HomeRequest, PlayRequest, YearsRequest};

/// Operations the host can call, by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Search,
    GetItem,
    GetStreams,
    Play,
    Discover,
    GetHome,
    ListGenres,
    ListCountries,
    ListYears,
}

impl Method {
    pub const ALL: [Method; 9] = [
        Self::Search,
        Self::GetItem,
        Self::GetStreams,
        Self::Play,
        Self::Discover,
        Self::GetHome,
        Self::ListGenres,
        Self::ListCountries,
        Self::ListYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::GetItem => "getItem",
            Self::GetStreams => "getStreams",
            Self::Play => "play",
            Self::Discover => "discover",
            Self::GetHome => "getHome",
            Self::ListGenres => "listGenres",
            Self::ListCountries => "listCountries",
            Self::ListYears => "listYears",
        }
    }
}

impl FromStr for Method {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|m| m.as_str() == s) {
            Some(method) => Ok(method),
            None => exn::bail!(ErrorKind::MethodNotFound {
                method: s.to_string(),
                available: Self::ALL.map(|m| m.as_str()).join(", "),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    /// Echoed back untouched in the [`Response`].
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    /// Positional arguments: an array payload is spread, any other non-null
    /// payload is the single argument, and `null` means none.
    pub fn args(&self) -> Vec<Value> {
        match &self.payload {
            Value::Array(args) => args.clone(),
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    /// The error message.
    Error(String),
}

impl Catalog {
    /// Runs one host request to completion. Never fails; errors are reported
    /// in the response.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn dispatch(&self, request: Request) -> Response {
        let outcome = match self.call(&request.method, request.args()).await {
            Ok(result) => Outcome::Result(result),
            Err(err) => {
                tracing::warn!(error = %*err, "Request failed");
                Outcome::Error((*err).to_string())
            },
        };
        Response { id: request.id, outcome }
    }

    /// Calls `method` with positional `args`.
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let method: Method = method.parse()?;
        match method {
            Method::Search => {
                let query: Option<String> = arg(&args, 0)?;
                encode(self.search(query.as_deref().unwrap_or_default()).await)
            },
            Method::GetItem => {
                let id: Option<String> = arg(&args, 0)?;
                encode(self.get_item(id.as_deref().unwrap_or_default()).await)
            },
            Method::GetStreams => {
                let id: Option<String> = arg(&args, 0)?;
                encode(self.get_streams(id.as_deref().unwrap_or_default()).await)
            },
            Method::Play => encode(self.play(arg_or_default::<PlayRequest>(&args)?).await?),
            Method::Discover => encode(self.discover(arg_or_default::<DiscoverRequest>(&args)?).await),
            Method::GetHome => encode(self.get_home(arg_or_default::<HomeRequest>(&args)?).await),
            Method::ListGenres => encode(list_genres()),
            Method::ListCountries => encode(list_countries()),
            Method::ListYears => encode(list_years(arg_or_default::<YearsRequest>(&args)?)),
        }
    }
}

/// The argument at `index`; absent or `null` is `None`.
fn arg<T: DeserializeOwned>(args: &[Value], index: usize) -> Result<Option<T>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let parsed = serde_json::from_value(value.clone())
                .or_raise(|| ErrorKind::InvalidArguments(format!("argument {index} has the wrong shape")))?;
            Ok(Some(parsed))
        },
    }
}

fn arg_or_default<T: DeserializeOwned + Default>(args: &[Value]) -> Result<T> {
    Ok(arg(args, 0)?.unwrap_or_default())
}

fn encode(value: impl Serialize) -> Result<Value> {
    serde_json::to_value(value).or_raise(|| ErrorKind::Serialization)
}
