//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::web;
use conduct_desk::inbound::http::pages::PageDirectory;
use conduct_desk::inbound::http::session_config::SessionSettings;
use conduct_desk::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) pages: web::Data<PageDirectory>,
}

impl ServerConfig {
    /// Construct a server configuration around pre-built HTTP state.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        http_state: HttpState,
        pages: PageDirectory,
    ) -> Self {
        Self {
            session,
            bind_addr,
            http_state: web::Data::new(http_state),
            pages: web::Data::new(pages),
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
