use std::sync::Arc;

use poem::Request;
use poem_openapi::{auth::Bearer, payload::Json, ApiResponse, OpenApi, SecurityScheme, Tags};
use serde_json::json;

use crate::errors::AuthError;
use crate::services::TokenService;
use crate::stores::profile_store::{BioFields, ContactInput};
use crate::stores::{ActivityStore, CredentialStore, ProfileStore};
use crate::types::dto::auth::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    UpdateProfileRequest, UserResponse, VerifyResponse,
};
use crate::types::dto::profile::{ActivitiesResponse, BioInformationRequest};
use crate::types::internal::activity::ActivityType;
use crate::types::internal::auth::AuthenticatedUser;

/// How many audit entries the activities endpoint returns at most
const ACTIVITY_PAGE_SIZE: u64 = 10;

/// JWT Bearer token authentication
///
/// The checker resolves the shared `TokenService` from request data,
/// verifies the presented token, and hands the caller's identity to the
/// handler. Requests with a missing, malformed, or expired token are
/// rejected before any handler body runs.
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT",
    checker = "bearer_checker"
)]
pub struct BearerAuth(pub AuthenticatedUser);

async fn bearer_checker(req: &Request, bearer: Bearer) -> Option<AuthenticatedUser> {
    let token_service = req.data::<Arc<TokenService>>()?;
    match token_service.verify(&bearer.token) {
        Ok(claims) => Some(AuthenticatedUser::from(claims)),
        Err(err) => {
            tracing::debug!("Rejected bearer token: {}", err);
            None
        }
    }
}

/// API tags for account endpoints
#[derive(Tags)]
enum AuthTags {
    /// Registration, login, and token verification
    Authentication,
    /// Profile, bio, and activity endpoints
    Profile,
}

/// Response for registration, distinct from login only in status code
#[derive(ApiResponse, Debug)]
pub enum RegisterApiResponse {
    /// Account created
    #[oai(status = 201)]
    Created(Json<AuthResponse>),
}

/// User account API endpoints
pub struct AuthApi {
    credential_store: Arc<CredentialStore>,
    profile_store: Arc<ProfileStore>,
    activity_store: Arc<ActivityStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        profile_store: Arc<ProfileStore>,
        activity_store: Arc<ActivityStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            credential_store,
            profile_store,
            activity_store,
            token_service,
        }
    }

    /// Record an activity without letting a failure affect the request
    async fn record_activity(&self, user_id: &str, activity_type: ActivityType, details: String) {
        if let Err(err) = self
            .activity_store
            .append(user_id, activity_type, details)
            .await
        {
            tracing::warn!("Failed to record {} activity: {}", activity_type, err);
        }
    }
}

#[OpenApi(prefix_path = "/users")]
impl AuthApi {
    /// Create an account and return a signed token for it
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<RegisterApiResponse, AuthError> {
        let user = self
            .credential_store
            .register(&body.email, &body.password, &body.first_name, &body.last_name)
            .await?;

        let token = self
            .token_service
            .issue(&user.id, &user.email, &user.role)?;

        let details = json!({
            "email": user.email,
            "firstName": user.first_name,
            "lastName": user.last_name,
        })
        .to_string();
        self.record_activity(&user.id, ActivityType::Login, details)
            .await;

        Ok(RegisterApiResponse::Created(Json(AuthResponse {
            token,
            user: user.into(),
        })))
    }

    /// Authenticate with email and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<AuthResponse>, AuthError> {
        let user = self
            .credential_store
            .authenticate(&body.email, &body.password)
            .await?;

        let token = self
            .token_service
            .issue(&user.id, &user.email, &user.role)?;

        self.record_activity(&user.id, ActivityType::Login, "User logged in".to_string())
            .await;

        Ok(Json(AuthResponse {
            token,
            user: user.into(),
        }))
    }

    /// Report who the presented token belongs to
    #[oai(path = "/verify", method = "post", tag = "AuthTags::Authentication")]
    async fn verify(&self, auth: BearerAuth) -> Result<Json<VerifyResponse>, AuthError> {
        Ok(Json(VerifyResponse {
            user_id: auth.0.user_id,
            email: auth.0.email,
            role: auth.0.role,
        }))
    }

    /// Fetch the authenticated user's account
    #[oai(path = "/profile", method = "get", tag = "AuthTags::Profile")]
    async fn get_profile(&self, auth: BearerAuth) -> Result<Json<UserResponse>, AuthError> {
        let user = self.credential_store.get(&auth.0.user_id).await?;
        Ok(Json(user.into()))
    }

    /// Update name and email on the authenticated user's account
    #[oai(path = "/profile", method = "put", tag = "AuthTags::Profile")]
    async fn update_profile(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<UserResponse>, AuthError> {
        let before = self.credential_store.get(&auth.0.user_id).await?;

        let user = self
            .credential_store
            .update_profile(&auth.0.user_id, &body.first_name, &body.last_name, &body.email)
            .await?;

        let details = json!({
            "old": {
                "firstName": before.first_name,
                "lastName": before.last_name,
                "email": before.email,
            },
            "new": {
                "firstName": user.first_name,
                "lastName": user.last_name,
                "email": user.email,
            },
        })
        .to_string();
        self.record_activity(&user.id, ActivityType::ProfileUpdate, details)
            .await;

        Ok(Json(user.into()))
    }

    /// Rotate the authenticated user's password
    #[oai(path = "/password", method = "put", tag = "AuthTags::Profile")]
    async fn change_password(
        &self,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        self.credential_store
            .change_password(&auth.0.user_id, &body.current_password, &body.new_password)
            .await?;

        Ok(Json(MessageResponse {
            message: "Password updated successfully".to_string(),
        }))
    }

    /// Upsert bio information and replace emergency contacts atomically
    #[oai(path = "/bio", method = "post", tag = "AuthTags::Profile")]
    async fn update_bio(
        &self,
        auth: BearerAuth,
        body: Json<BioInformationRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let body = body.0;

        let bio = BioFields {
            full_name: body.full_name,
            date_of_birth: body.date_of_birth,
            gender: body.gender,
            address: body.address,
            phone: body.phone,
            email: body.email,
            blood_type: body.blood_type,
            allergies: body.allergies,
            medications: body.medications,
            chronic_conditions: body.chronic_conditions,
            insurance_provider: body.insurance_provider,
            policy_number: body.policy_number,
            profile_photo: body.profile_photo,
            insurance_card: body.insurance_card,
        };
        let contacts = body
            .emergency_contacts
            .into_iter()
            .map(|c| ContactInput {
                name: c.name,
                phone: c.phone,
            })
            .collect();

        self.profile_store
            .upsert_bio(&auth.0.user_id, bio, contacts)
            .await?;

        Ok(Json(MessageResponse {
            message: "Bio information updated successfully".to_string(),
        }))
    }

    /// List the authenticated user's most recent activity
    #[oai(path = "/activities", method = "get", tag = "AuthTags::Profile")]
    async fn activities(&self, auth: BearerAuth) -> Result<Json<ActivitiesResponse>, AuthError> {
        let activities = self
            .activity_store
            .list_recent(&auth.0.user_id, ACTIVITY_PAGE_SIZE)
            .await?;

        Ok(Json(ActivitiesResponse {
            activities: activities.into_iter().map(Into::into).collect(),
        }))
    }

    /// End the session; the token itself stays valid until it expires
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: BearerAuth) -> Result<Json<MessageResponse>, AuthError> {
        self.record_activity(
            &auth.0.user_id,
            ActivityType::Logout,
            "User logged out".to_string(),
        )
        .await;

        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PasswordHasher;
    use crate::test::utils::{setup_test_db, test_token_service, TEST_PEPPER};
    use crate::types::dto::profile::EmergencyContactRequest;
    use sea_orm::DatabaseConnection;

    fn test_api(db: &DatabaseConnection) -> AuthApi {
        AuthApi::new(
            Arc::new(CredentialStore::new(
                db.clone(),
                PasswordHasher::new(TEST_PEPPER.to_string()),
            )),
            Arc::new(ProfileStore::new(db.clone())),
            Arc::new(ActivityStore::new(db.clone())),
            test_token_service(),
        )
    }

    fn register_body(email: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Archer".to_string(),
        })
    }

    fn bearer(user: &UserResponse) -> BearerAuth {
        BearerAuth(AuthenticatedUser {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        })
    }

    #[tokio::test]
    async fn test_register_returns_created_with_verifiable_token() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(response)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        assert_eq!(response.user.email, "alice@example.com");
        assert_eq!(response.user.role, "user");

        let claims = test_token_service().verify(&response.token).unwrap();
        assert_eq!(claims.sub, response.user.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "user");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        api.register(register_body("alice@example.com")).await.unwrap();
        let err = api
            .register(register_body("alice@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Email already registered");
    }

    #[tokio::test]
    async fn test_login_issues_token_and_records_activity() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let response = api
            .login(Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "secret1".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(response.user.id, registered.user.id);
        assert!(response.user.last_login.is_some());

        let activities = api.activities(bearer(&response.user)).await.unwrap();
        assert_eq!(activities.activities[0].details, "User logged in");
        assert_eq!(activities.activities[0].activity_type, "login");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_rejected() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        api.register(register_body("alice@example.com")).await.unwrap();

        let err = api
            .login(Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_verify_echoes_the_token_identity() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let response = api.verify(bearer(&registered.user)).await.unwrap();
        assert_eq!(response.user_id, registered.user.id);
        assert_eq!(response.email, "alice@example.com");
        assert_eq!(response.role, "user");
    }

    #[tokio::test]
    async fn test_update_profile_records_old_and_new_values() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let response = api
            .update_profile(
                bearer(&registered.user),
                Json(UpdateProfileRequest {
                    first_name: "Alicia".to_string(),
                    last_name: "Archer".to_string(),
                    email: "alicia@example.com".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(response.first_name, "Alicia");
        assert_eq!(response.email, "alicia@example.com");

        let activities = api.activities(bearer(&registered.user)).await.unwrap();
        assert_eq!(activities.activities[0].activity_type, "profile_update");
        let details: serde_json::Value =
            serde_json::from_str(&activities.activities[0].details).unwrap();
        assert_eq!(details["old"]["email"], "alice@example.com");
        assert_eq!(details["new"]["email"], "alicia@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_to_taken_email_conflicts() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        api.register(register_body("bob@example.com")).await.unwrap();
        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let err = api
            .update_profile(
                bearer(&registered.user),
                Json(UpdateProfileRequest {
                    first_name: "Alice".to_string(),
                    last_name: "Archer".to_string(),
                    email: "bob@example.com".to_string(),
                }),
            )
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Email already taken");
    }

    #[tokio::test]
    async fn test_change_password_requires_the_current_one() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let err = api
            .change_password(
                bearer(&registered.user),
                Json(ChangePasswordRequest {
                    current_password: "wrong".to_string(),
                    new_password: "secret2".to_string(),
                }),
            )
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid email or password");

        api.change_password(
            bearer(&registered.user),
            Json(ChangePasswordRequest {
                current_password: "secret1".to_string(),
                new_password: "secret2".to_string(),
            }),
        )
        .await
        .unwrap();

        api.login(Json(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret2".to_string(),
        }))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_update_bio_persists_and_reports_success() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let mut body = BioInformationRequest {
            full_name: "Alice Archer".to_string(),
            date_of_birth: String::new(),
            gender: String::new(),
            address: String::new(),
            phone: String::new(),
            email: "alice@example.com".to_string(),
            blood_type: "O+".to_string(),
            allergies: String::new(),
            medications: String::new(),
            chronic_conditions: String::new(),
            insurance_provider: String::new(),
            policy_number: String::new(),
            emergency_contacts: vec![],
            profile_photo: String::new(),
            insurance_card: String::new(),
        };
        body.emergency_contacts.push(EmergencyContactRequest {
            name: "Bob".to_string(),
            phone: "555-1000".to_string(),
        });

        let response = api
            .update_bio(bearer(&registered.user), Json(body))
            .await
            .unwrap();
        assert_eq!(response.message, "Bio information updated successfully");

        let (bio, contacts) = ProfileStore::new(db)
            .get_bio(&registered.user.id)
            .await
            .unwrap();
        assert_eq!(bio.full_name, "Alice Archer");
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Bob");
    }

    #[tokio::test]
    async fn test_activities_listing_is_capped_at_ten() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        for _ in 0..12 {
            api.logout(bearer(&registered.user)).await.unwrap();
        }

        let response = api.activities(bearer(&registered.user)).await.unwrap();
        assert_eq!(response.activities.len(), 10);
    }

    #[tokio::test]
    async fn test_logout_reports_success_and_records_activity() {
        let db = setup_test_db().await;
        let api = test_api(&db);

        let RegisterApiResponse::Created(Json(registered)) =
            api.register(register_body("alice@example.com")).await.unwrap();

        let response = api.logout(bearer(&registered.user)).await.unwrap();
        assert_eq!(response.message, "Logged out successfully");

        let activities = api.activities(bearer(&registered.user)).await.unwrap();
        assert_eq!(activities.activities[0].activity_type, "logout");
        assert_eq!(activities.activities[0].details, "User logged out");
    }
}
