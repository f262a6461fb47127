use std::sync::Arc;

use auth::PasswordHasher;
use auth::SecretKey;
use auth::TokenService;
use auth_server::config::SeedUser;
use auth_server::domain::user::service::UserService;
use auth_server::inbound::http::router::create_router;
use auth_server::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &str = "test-secret-for-token-signing";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Shares the server's key, for crafting tokens in tests
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing parameters keep the suite fast
        let hasher = PasswordHasher::with_params(64, 1, 1).expect("Invalid hashing parameters");
        let user_repository = Arc::new(
            InMemoryUserRepository::from_seed(&seed_users(), &hasher)
                .expect("Failed to build user directory"),
        );

        let token_service = Arc::new(new_token_service());
        let user_service = Arc::new(UserService::new(
            user_repository,
            Arc::clone(&token_service),
        ));

        let router = create_router(user_service, token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_service: new_token_service(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Log in and return the access token
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with valid credentials and extract the token
    pub async fn access_token(&self, username: &str) -> String {
        let response = self.login(username, "password").await;
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");

        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// GET / with the given Authorization header value
    pub async fn get_profile(&self, authorization: &str) -> reqwest::Response {
        self.get("/")
            .header("Authorization", authorization)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn new_token_service() -> TokenService {
    TokenService::new(&SecretKey::new(TEST_SECRET).expect("Invalid key"))
        .expect("Failed to create token service")
}

fn seed_users() -> Vec<SeedUser> {
    vec![
        SeedUser {
            id: 1,
            username: "rijk".to_string(),
            password: "password".to_string(),
            full_name: "Rijk van Zanten".to_string(),
            permission_group: "administrator".to_string(),
        },
        SeedUser {
            id: 2,
            username: "welling".to_string(),
            password: "password".to_string(),
            full_name: "Welling Guzmán".to_string(),
            permission_group: "administrator".to_string(),
        },
    ]
}
