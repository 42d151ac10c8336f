/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "gofiber-backend";

pub const LISTEN_PORT: u16 = 8080;

pub const API_KEY_HEADER: &str = "X-API-Key";

pub mod pool {

    pub const MAX_CONNECTIONS: u32 = 10;

    pub const MIN_CONNECTIONS: u32 = 1;
}

pub mod cors {
    use axum::http::Method;

    pub const ALLOWED_METHODS: [Method; 5] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    pub const ALLOWED_HEADERS: [&str; 5] = [
        "origin",
        "content-type",
        "accept",
        "authorization",
        "x-api-key",
    ];
}
