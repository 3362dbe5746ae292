use crate::{
    api::{account, leave_request, user},
    config::Config,
    error::ApiError,
};
use actix_cors::Cors;
use actix_web::web;

/// Any origin, method and header; the request origin is echoed so credentials work.
pub fn cors() -> Cors {
    Cors::permissive().max_age(3600)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Malformed bodies and path ids get the same {"message": ...} shape as handler errors
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::validation(err.to_string()).into()
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::validation(err.to_string()).into()
    }));

    cfg.service(
        web::scope(&config.api_prefix)
            // signup / login
            .service(web::resource("/signup/admin").route(web::post().to(account::signup_admin)))
            .service(web::resource("/signup/user").route(web::post().to(account::signup_user)))
            .service(web::resource("/login/admin").route(web::post().to(account::login_admin)))
            .service(web::resource("/login/user").route(web::post().to(account::login_user)))
            // leave workflow
            .service(
                web::resource("/notify-admin").route(web::post().to(leave_request::notify_admin)),
            )
            .service(
                web::scope("/leave-requests")
                    // /leave-requests/pending
                    .service(
                        web::resource("/pending")
                            .route(web::get().to(leave_request::pending_leave_requests)),
                    )
                    // /leave-requests/status/{user_id}
                    .service(
                        web::resource("/status/{user_id}")
                            .route(web::get().to(leave_request::latest_leave_request)),
                    )
                    // /leave-requests/{leave_id}/approve
                    .service(
                        web::resource("/{leave_id}/approve")
                            .route(web::post().to(leave_request::approve_leave)),
                    )
                    // /leave-requests/{leave_id}/reject
                    .service(
                        web::resource("/{leave_id}/reject")
                            .route(web::post().to(leave_request::reject_leave)),
                    ),
            )
            // users and assigned time
            .service(web::resource("/users").route(web::get().to(user::list_users)))
            .service(
                web::resource("/users/{user_id}/assigned_time")
                    .route(web::get().to(user::get_assigned_time)),
            )
            .service(web::resource("/assign-time").route(web::post().to(user::assign_time))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{call_json, init_app, lazy_pool};
    use actix_web::{
        App, HttpResponse,
        http::{Method, StatusCode, header},
        test::{self, TestRequest},
    };

    #[actix_web::test]
    async fn bad_path_id_is_a_json_validation_error() {
        let app = init_app!(lazy_pool());

        let (status, body) = call_json!(app, TestRequest::get().uri("/users/abc/assigned_time"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("abc"));

        let (status, body) = call_json!(app, TestRequest::post().uri("/leave-requests/-1/approve"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn cors_answers_preflight_for_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .route("/users", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/users")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[actix_web::test]
    async fn cors_tags_simple_requests() {
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .route("/users", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = TestRequest::get()
            .uri("/users")
            .insert_header((header::ORIGIN, "http://example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://example.com"
        );
    }
}
