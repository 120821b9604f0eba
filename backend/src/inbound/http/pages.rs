//! Static HTML pages.
//!
//! Pages are plain files in a configured directory. The login, landing and
//! complaint form pages are public; the admin pages sit behind
//! [`RequireAdmin`], so a missing or non-admin session is redirected to
//! `/login` before the file is read.
//!
//! Other files in the directory (scripts, stylesheets, images) are served as
//! static assets by [`PageDirectory::assets`]. The admin page files are never
//! served that way.

use std::path::{Path, PathBuf};

use actix_files::Files;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::{AdminPrincipal, RequireAdmin};

const DASHBOARD: &str = "dashboard.html";
const STUDENT_DETAIL: &str = "detail-siswa.html";
const STATISTICS: &str = "statistik.html";
const COMPLAINT_INBOX: &str = "aduan-siswa.html";

/// Page files only reachable through the admin gate.
pub const ADMIN_PAGE_FILES: [&str; 4] = [DASHBOARD, STUDENT_DETAIL, STATISTICS, COMPLAINT_INBOX];

fn is_admin_page(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            ADMIN_PAGE_FILES
                .iter()
                .any(|page| page.eq_ignore_ascii_case(name))
        })
}

/// Directory holding the HTML pages.
#[derive(Debug, Clone)]
pub struct PageDirectory(PathBuf);

impl PageDirectory {
    /// Serve pages from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// Static asset service for everything in the directory except the admin
    /// page files, which answer `404`.
    ///
    /// Matches every path, so register it after all other routes.
    #[must_use]
    pub fn assets(&self) -> Files {
        Files::new("/", &self.0).path_filter(|path, _| !is_admin_page(path))
    }

    async fn serve(&self, file: &str) -> ApiResult<HttpResponse> {
        let path = self.0.join(file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(HttpResponse::Ok()
                .content_type(ContentType::html())
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .body(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "page file missing");
                Err(Error::not_found(format!("page {file} not found")))
            }
            Err(error) => Err(Error::internal(format!(
                "failed to read page {}: {error}",
                path.display()
            ))),
        }
    }
}

#[get("/")]
pub async fn landing_page(pages: web::Data<PageDirectory>) -> ApiResult<HttpResponse> {
    pages.serve("index.html").await
}

#[get("/login")]
pub async fn login_page(pages: web::Data<PageDirectory>) -> ApiResult<HttpResponse> {
    pages.serve("login.html").await
}

/// Public complaint form.
#[get("/form-aduan")]
pub async fn complaint_form_page(pages: web::Data<PageDirectory>) -> ApiResult<HttpResponse> {
    pages.serve("form-aduan.html").await
}

#[get("/dashboard", wrap = "RequireAdmin")]
pub async fn dashboard_page(
    _admin: AdminPrincipal,
    pages: web::Data<PageDirectory>,
) -> ApiResult<HttpResponse> {
    pages.serve(DASHBOARD).await
}

/// Student violation detail page.
#[get("/detail-siswa", wrap = "RequireAdmin")]
pub async fn student_detail_page(
    _admin: AdminPrincipal,
    pages: web::Data<PageDirectory>,
) -> ApiResult<HttpResponse> {
    pages.serve(STUDENT_DETAIL).await
}

#[get("/statistik", wrap = "RequireAdmin")]
pub async fn statistics_page(
    _admin: AdminPrincipal,
    pages: web::Data<PageDirectory>,
) -> ApiResult<HttpResponse> {
    pages.serve(STATISTICS).await
}

/// Complaint inbox page.
#[get("/aduan-siswa", wrap = "RequireAdmin")]
pub async fn complaint_inbox_page(
    _admin: AdminPrincipal,
    pages: web::Data<PageDirectory>,
) -> ApiResult<HttpResponse> {
    pages.serve(COMPLAINT_INBOX).await
}

/// Register every page route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(landing_page)
        .service(login_page)
        .service(complaint_form_page)
        .service(dashboard_page)
        .service(student_detail_page)
        .service(statistics_page)
        .service(complaint_inbox_page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use tempfile::TempDir;

    fn page_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        for name in ["index.html", "login.html", "dashboard.html", "statistik.html"] {
            std::fs::write(dir.path().join(name), format!("<h1>{name}</h1>")).expect("write page");
        }
        std::fs::write(dir.path().join("app.js"), "console.log(1);").expect("write asset");
        dir
    }

    async fn call(ports: MockPorts, dir: &TempDir, path: &str) -> actix_web::dev::ServiceResponse {
        let pages = PageDirectory::new(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .app_data(web::Data::new(pages.clone()))
                .wrap(test_session_middleware())
                .configure(configure)
                .service(pages.assets()),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await
    }

    #[rstest]
    #[case("/")]
    #[case("/login")]
    #[actix_web::test]
    async fn public_pages_skip_the_gate(#[case] path: &str) {
        let dir = page_dir();
        let mut ports = MockPorts::default();
        ports.authorizer.expect_authorize().never();

        let res = call(ports, &dir, path).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }

    #[rstest]
    #[case("/dashboard")]
    #[case("/detail-siswa")]
    #[case("/statistik")]
    #[case("/aduan-siswa")]
    #[actix_web::test]
    async fn protected_pages_redirect_when_denied(#[case] path: &str) {
        let dir = page_dir();

        let res = call(MockPorts::denying(), &dir, path).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }

    #[actix_web::test]
    async fn admin_sees_dashboard() {
        let dir = page_dir();

        let res = call(MockPorts::allowing_admin(), &dir, "/dashboard").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "<h1>dashboard.html</h1>");
    }

    #[actix_web::test]
    async fn missing_page_file_is_not_found() {
        let dir = page_dir();
        let mut ports = MockPorts::default();
        ports.authorizer.expect_authorize().never();

        let res = call(ports, &dir, "/form-aduan").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn assets_are_served_without_a_session() {
        let dir = page_dir();
        let mut ports = MockPorts::default();
        ports.authorizer.expect_authorize().never();

        let res = call(ports, &dir, "/app.js").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "console.log(1);");
    }

    #[rstest]
    #[case("/dashboard.html")]
    #[case("/statistik.html")]
    #[case("/DASHBOARD.HTML")]
    #[actix_web::test]
    async fn admin_page_files_are_not_assets(#[case] path: &str) {
        let dir = page_dir();
        let mut ports = MockPorts::default();
        ports.authorizer.expect_authorize().never();

        let res = call(ports, &dir, path).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("dashboard.html", true)]
    #[case("nested/Aduan-Siswa.html", true)]
    #[case("login.html", false)]
    #[case("dashboard.html.bak", false)]
    #[::core::prelude::v1::test]
    fn recognises_admin_page_files(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_admin_page(Path::new(path)), expected);
    }
}
