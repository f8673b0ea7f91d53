// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Keycloak operator resources (`keycloak.org/v1alpha1`).
//!
//! - [`KeycloakRealm`] - a realm, optionally with inline users and clients
//! - [`KeycloakClient`] - an OIDC/SAML client of a realm
//! - [`KeycloakUser`] - a user of a realm
//!
//! Realms, clients and users find their Keycloak instance and realm through
//! label selectors.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_k8s::crds::keycloak::{KeycloakAPIRealm, KeycloakRealmSpec};
//!
//! let spec = KeycloakRealmSpec {
//!     realm: KeycloakAPIRealm {
//!         realm: "example".to_string(),
//!         enabled: Some(true),
//!         display_name: Some("Example Realm".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert_eq!(spec.realm.realm, "example");
//! ```

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KeycloakRealm is the Schema for the keycloakrealms API.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "keycloak.org",
    version = "v1alpha1",
    kind = "KeycloakRealm",
    namespaced,
    doc = "KeycloakRealm is the Schema for the keycloakrealms API. It describes a Keycloak realm, including its users, clients and identity providers."
)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakRealmSpec {
    /// When set to true, this KeycloakRealm will be marked as unmanaged and
    /// not be managed by this operator. It can then be used for targeting
    /// purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmanaged: Option<bool>,

    /// Selector for looking up Keycloak Custom Resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_selector: Option<LabelSelector>,

    /// Keycloak Realm REST object.
    pub realm: KeycloakAPIRealm,

    /// A list of overrides to the default Realm behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_overrides: Option<Vec<RedirectorIdentityProviderOverride>>,
}

/// Realm representation as understood by the Keycloak admin API.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakAPIRealm {
    /// Realm id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Realm name.
    pub realm: String,

    /// Realm enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Realm display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Realm HTML display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name_html: Option<String>,

    /// A set of Keycloak Users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<KeycloakAPIUser>>,

    /// A set of Keycloak Clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<KeycloakAPIClient>>,

    /// A set of Identity Providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_providers: Option<Vec<KeycloakIdentityProvider>>,

    /// Enable events recording.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_enabled: Option<bool>,

    /// A set of Event Listeners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_listeners: Option<Vec<String>>,

    /// Enable events recording.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_events_enabled: Option<bool>,

    /// Enable admin events details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_events_details_enabled: Option<bool>,

    /// Access Token Lifespan in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub access_token_lifespan: Option<i32>,

    /// SSL requirement for the realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_required: Option<SslRequired>,

    /// Login with email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_with_email_allowed: Option<bool>,

    /// User registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_allowed: Option<bool>,

    /// Forgot password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_allowed: Option<bool>,

    /// Remember me.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,

    /// Verify email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_email: Option<bool>,

    /// Duplicate emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_emails_allowed: Option<bool>,

    /// Brute force detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brute_force_protected: Option<bool>,

    /// Login Theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_theme: Option<String>,

    /// Account Theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_theme: Option<String>,

    /// Admin Console Theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_theme: Option<String>,

    /// Email Theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_theme: Option<String>,

    /// Internationalization Enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internationalization_enabled: Option<bool>,

    /// Supported Locales.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_locales: Option<Vec<String>>,

    /// Default Locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    /// Email settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<BTreeMap<String, String>>,

    /// Realm and client roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<RolesRepresentation>,
}

/// SSL requirement of a realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SslRequired {
    /// SSL required for all requests
    All,
    /// SSL required for external requests only
    External,
    /// SSL not required
    None,
}

/// Realm and client roles of a realm.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolesRepresentation {
    /// Realm roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<Vec<RoleRepresentation>>,

    /// Client roles, keyed by client id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<BTreeMap<String, Vec<RoleRepresentation>>>,
}

/// A realm or client role.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    /// Id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name.
    pub name: String,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Composite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<bool>,

    /// Client role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role: Option<bool>,

    /// Container Id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Role Attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,
}

/// Overrides the identity provider used for a given authentication flow.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedirectorIdentityProviderOverride {
    /// Flow to be overridden.
    pub for_flow: String,

    /// Identity Provider to be overridden.
    pub identity_provider: String,
}

/// An external identity provider of a realm.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakIdentityProvider {
    /// Identity Provider Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Identity Provider Display Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Identity Provider Internal ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,

    /// Identity Provider ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// Identity Provider enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Identity Provider Trust Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_email: Option<bool>,

    /// Identity Provider Store to Token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_token: Option<bool>,

    /// Adds Read Token role when creating this Identity Provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_read_token_role_on_create: Option<bool>,

    /// Identity Provider First Broker Login Flow Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_broker_login_flow_alias: Option<String>,

    /// Identity Provider Post Broker Login Flow Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_broker_login_flow_alias: Option<String>,

    /// Identity Provider config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, String>>,
}

/// User representation as understood by the Keycloak admin API.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakAPIUser {
    /// User ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// User Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// First Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// True if email has already been verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// User enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// A set of Realm Roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_roles: Option<Vec<String>>,

    /// A set of Client Roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_roles: Option<BTreeMap<String, Vec<String>>>,

    /// A set of Required Actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_actions: Option<Vec<String>>,

    /// A set of Groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,

    /// A set of Federated Identities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federated_identities: Option<Vec<FederatedIdentity>>,

    /// A set of Credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<KeycloakCredential>>,

    /// A set of Attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Vec<String>>>,
}

/// Link between a user and an identity provider account.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FederatedIdentity {
    /// Federated Identity Provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider: Option<String>,

    /// Federated Identity User ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Federated Identity User Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// A user credential.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakCredential {
    /// Credential Type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Credential Value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// True if this credential object is temporary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,
}

/// KeycloakClient is the Schema for the keycloakclients API.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "keycloak.org",
    version = "v1alpha1",
    kind = "KeycloakClient",
    namespaced,
    doc = "KeycloakClient is the Schema for the keycloakclients API. It describes an OIDC or SAML client registered in a Keycloak realm."
)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakClientSpec {
    /// Selector for looking up KeycloakRealm Custom Resources.
    pub realm_selector: LabelSelector,

    /// Keycloak Client REST object.
    pub client: KeycloakAPIClient,

    /// Client Roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleRepresentation>>,
}

/// Client representation as understood by the Keycloak admin API.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakAPIClient {
    /// Client ID. If not specified, automatically generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Client ID.
    pub client_id: String,

    /// Client Secret. The Operator will automatically create a Secret based
    /// on this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Client name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Client description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Client enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// What Client authentication type to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_authenticator_type: Option<String>,

    /// A list of valid Redirection URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,

    /// A list of valid Web Origins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_origins: Option<Vec<String>>,

    /// Application base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Application root URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,

    /// Application Admin URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,

    /// True if a client supports only Bearer Tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_only: Option<bool>,

    /// True if Consent Screen is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_required: Option<bool>,

    /// True if Standard flow is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_flow_enabled: Option<bool>,

    /// True if Implicit flow is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_flow_enabled: Option<bool>,

    /// True if Direct Grant is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_access_grants_enabled: Option<bool>,

    /// True if Service Accounts are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_accounts_enabled: Option<bool>,

    /// True if this is a public Client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_client: Option<bool>,

    /// True if this client supports Front Channel logout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontchannel_logout: Option<bool>,

    /// Protocol used for this Client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Client Attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,

    /// True if Full Scope is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_scope_allowed: Option<bool>,

    /// Node registration timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_re_registration_timeout: Option<i32>,

    /// A list of default client scopes. Default client scopes are always
    /// applied when issuing OpenID Connect tokens or SAML assertions for this
    /// client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_client_scopes: Option<Vec<String>>,

    /// A list of optional client scopes. Optional client scopes are applied
    /// when issuing tokens for this client, but only when they are requested
    /// by the scope parameter in the OpenID Connect authorization request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_client_scopes: Option<Vec<String>>,

    /// Protocol Mappers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mappers: Option<Vec<KeycloakProtocolMapper>>,

    /// Surrogate Authentication Required option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate_auth_required: Option<bool>,

    /// Access options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<BTreeMap<String, bool>>,
}

/// Maps claims or assertions into tokens.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakProtocolMapper {
    /// Protocol Mapper ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Protocol Mapper Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Protocol to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Protocol Mapper to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mapper: Option<String>,

    /// True if Consent Screen is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_required: Option<bool>,

    /// Text to use for displaying Consent Screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_text: Option<String>,

    /// Config options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, String>>,
}

/// KeycloakUser is the Schema for the keycloakusers API.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "keycloak.org",
    version = "v1alpha1",
    kind = "KeycloakUser",
    namespaced,
    doc = "KeycloakUser is the Schema for the keycloakusers API. It describes a user of a Keycloak realm."
)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakUserSpec {
    /// Selector for looking up KeycloakRealm Custom Resources.
    pub realm_selector: LabelSelector,

    /// Keycloak User REST object.
    pub user: KeycloakAPIUser,
}

#[cfg(test)]
#[path = "keycloak_tests.rs"]
mod keycloak_tests;
