//! OAuth client record and the OAuth 2.0 vocabulary it stores.

use serde::{Deserialize, Serialize};

/// Grant type used by confidential and public clients to exchange an
/// authorization code for an access token.
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

/// Grant type where the access token is returned immediately without an
/// authorization code exchange step.
pub const GRANT_TYPE_IMPLICIT: &str = "implicit";

/// Grant type used by first-party clients to exchange user credentials for an
/// access token.
pub const GRANT_TYPE_PASSWORD: &str = "password";

/// Grant type used by clients to obtain an access token outside the context
/// of a user.
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Grant type used to exchange a refresh token for a new access token.
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

/// Response type requesting an authorization code.
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Response type requesting an access token.
pub const RESPONSE_TYPE_TOKEN: &str = "token";

/// An OAuth 2.0 client registration.
///
/// `id` and `secret` are always assigned by the registry; values supplied by
/// the caller on creation are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    /// Identifier for this client.
    pub id: String,

    /// Human-readable name presented to the end-user during authorization.
    pub name: String,

    /// The client's secret.
    pub secret: String,

    /// Allowed redirect URL for the client.
    pub redirect_uri: String,

    /// Grant type the client is allowed to use.
    pub grant_type: String,

    /// Response type the client can use at the authorization endpoint.
    pub response_type: String,

    /// Space-separated list of scope values the client can request.
    pub scope: String,

    /// Public clients have no usable secret; the client_credentials grant is
    /// disabled for them.
    pub public: bool,
}
