/// Capability for attaching an optional credential at call time. Anonymous
/// booking is allowed, so `None` is a normal answer, not an error.
pub trait AuthProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// No credential available; every call goes out anonymous.
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token supplied by the embedder (e.g. from its session store).
pub struct StaticToken(pub String);

impl AuthProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
