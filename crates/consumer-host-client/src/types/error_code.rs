/*
[INPUT]:  Server error codes (string or numeric JSON)
[OUTPUT]: Closed ErrorCode taxonomy with canonical messages and categories
[POS]:    Data layer - consumer host error catalogue
[UPDATE]: When the server adds or renumbers error codes
*/

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coarse grouping of server error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Invalid,
    Forbidden,
    Offline,
    Internal,
    NotFound,
    NotLoggedIn,
    Unknown,
}

macro_rules! error_codes {
    ($($variant:ident = $code:literal => $message:literal,)+) => {
        /// Error codes returned by the consumer host
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($variant,)+
            /// A code outside the known catalogue
            Unknown(u32),
        }

        impl ErrorCode {
            /// Map a numeric code onto the catalogue
            pub fn from_code(code: u32) -> Self {
                match code {
                    $($code => ErrorCode::$variant,)+
                    other => ErrorCode::Unknown(other),
                }
            }

            /// Numeric code as sent by the server
            pub fn code(&self) -> u32 {
                match self {
                    $(ErrorCode::$variant => $code,)+
                    ErrorCode::Unknown(code) => *code,
                }
            }

            /// Canonical server message for this code
            pub fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $message,)+
                    ErrorCode::Unknown(_) => "Unknown error.",
                }
            }
        }
    };
}

error_codes! {
    JsonParse = 2000 => "Invalid: json parse error.",
    InvalidFundAmount = 2001 => "Invalid: invalid fund amount.",
    InvalidCallbackSignatureDecode = 2002 => "Invalid: invalid callback signature decode.",
    InvalidCallbackSignatureLength = 2003 => "Invalid: invalid callback signature length.",
    ChannelNotExpired = 2004 => "Invalid: channel not expired.",
    SendQueryChannelFailure = 2005 => "Invalid: send query channel failure.",
    InvalidDeploymentIndexer = 2006 => "Invalid: invalid deployment and indexer.",
    InvalidExpirationTime = 2007 => "Invalid: invalid expiration time.",
    InvalidTotalAmount = 2008 => "Invalid: invalid total amount.",
    InsufficientContractBalance = 2009 => "Invalid: user balance in contract is not enough.",
    SendOpenChannelFailure = 2010 => "Invalid: send open channel failure.",
    InvalidApiKeyRemoval = 2011 => "Invalid: invalid ApiKey when remove.",
    PriceTooSmall = 2012 => "Invalid: price is too small.",
    PlanMaximumTooSmall = 2013 => "Invalid: hosting plan maximum too small, need >= 2.",
    UserMissingInContract = 2014 => "Invalid: user missing in contract.",
    AdminNotSuperAdmin = 2020 => "Forbidden: admin not super admin.",
    UserNotApproved = 2021 => "Forbidden: user not approved.",
    ChannelNotActive = 2022 => "Forbidden: channel not actived.",
    UserNotActive = 2023 => "Forbidden: user not actived.",
    IndexerOffline = 2030 => "Offline: indexer offline.",
    Database = 2050 => "Internal: db (sqlx) error.",
    Template = 2051 => "Internal: template (tera) error.",
    NullResponse = 2052 => "Internal: null response.",
    ContractAbi = 2053 => "Internal: contract address and ABI error.",
    StaticFile = 2054 => "Internal: app handle static file error.",
    SessionHandle = 2055 => "Internal: app from request parts SessionHandle error.",
    AppContext = 2056 => "Internal: app from request parts AppContext error.",
    Cookie = 2057 => "Internal: app from request parts Cookie error.",
    PasswordHash = 2058 => "Internal: argon2 hash password error.",
    ChainHeightParse = 2059 => "Internal: parse chain height to u64 error.",
    IndexerNotFound = 2060 => "Not found: indexer model.",
    AdminNotFound = 2061 => "Not found: admin model.",
    ApiKeyNotFound = 2062 => "Not found: apikey model.",
    DeploymentNotFound = 2063 => "Not found: deployment model.",
    DeploymentIndexerNotFound = 2064 => "Not found: deployment indexer model.",
    ProjectNotFound = 2065 => "Not found: project model.",
    StateChannelNotFound = 2066 => "Not found: state channel model.",
    UserNotFound = 2067 => "Not found: user model.",
    HostingPlanNotFound = 2068 => "Not found: hosting plan model.",
    NoActiveIndexer = 2069 => "Not found: project has no online and active indexer.",
    HostingPlanExpired = 2070 => "Not found: hosting plan is expired.",
    ContractEndpointUnreachable = 2080 => "Internal: contract endpoint cannot reach.",
    ContractSignerInit = 2081 => "Internal: contract signer cannot init.",
    SendTransaction = 2082 => "Internal: send transaction failure. see error log.",
    WaitTransaction = 2083 => "Internal: wait transaction failure. see error log.",
    ChannelOpenCall = 2084 => "Internal: contract channel open call failure. see error log.",
    ChannelFundCall = 2085 => "Internal: contract channel fund call failure. see error log.",
    ChannelFinishCall = 2086 => "Internal: contract channel finish call failure. see error log.",
    ChannelClaimCall = 2087 => "Internal: contract channel claim call failure. see error log.",
    ChannelTerminateCall = 2088 => "Internal: contract channel terminate call failure. see error log.",
    MissingEndpointHttp = 2100 => "Internal: MISSING ENDPOINT HTTP",
    ChainSyncTokenContract = 2101 => "Internal: Chain sync token contract failure",
    ChainSyncConsumerContract = 2102 => "Internal: Chain sync consumer contract serialize.",
    InvalidIndexer = 2103 => "Internal: Indexer is invalid.",
    NotLoggedIn = 403 => "not login",
}

impl ErrorCode {
    /// Category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::NotLoggedIn => ErrorCategory::NotLoggedIn,
            ErrorCode::Unknown(_) => ErrorCategory::Unknown,
            other => match other.code() {
                2000..=2019 => ErrorCategory::Invalid,
                2020..=2029 => ErrorCategory::Forbidden,
                2030..=2049 => ErrorCategory::Offline,
                2060..=2079 => ErrorCategory::NotFound,
                _ => ErrorCategory::Internal,
            },
        }
    }

    /// Whether this code should trigger a forced re-login
    pub fn requires_login(&self) -> bool {
        matches!(self, ErrorCode::NotLoggedIn)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        ErrorCode::from_code(code)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code().to_string())
    }
}

impl ErrorCode {
    /// Read a code from any JSON value.
    ///
    /// Numbers and numeric strings map through the catalogue. Anything else
    /// (a symbolic code, null, an out-of-range number) is `Unknown(0)`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let code = match value {
            serde_json::Value::Number(number) => number.as_u64(),
            serde_json::Value::String(text) => text.trim().parse::<u64>().ok(),
            _ => None,
        };
        code
            .and_then(|code| u32::try_from(code).ok())
            .map_or(ErrorCode::Unknown(0), ErrorCode::from_code)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(ErrorCode::from_json(&value))
    }
}
