//! Top-level facade crate for the counter service.
//!
//! Re-exports the state machine, the server library, and the client so users
//! can depend on a single crate.

pub mod core {
    pub use counter_core::*;
}

pub mod server {
    pub use counter_server::*;
}

pub mod client {
    pub use counter_client::*;
}

#[cfg(test)]
mod tests {
    #[test]
    fn facade_reaches_every_layer() {
        let state = crate::server::app_state::AppState::new();
        assert_eq!(state.counter().increment(), Ok(1));
        assert_eq!(crate::core::counter_path(), "/api/v1/counter");
        assert!(crate::client::CounterClient::new("localhost:8080").is_ok());
    }
}
