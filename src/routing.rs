//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    api::{get_summary_api, list_transactions_api},
    dashboard::{get_analytics_page, get_dashboard_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_category_options, get_create_transaction_page, get_edit_transaction_page,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::CATEGORY_OPTIONS, get(get_category_options))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_api).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::SUMMARY_API, get(get_summary_api));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppState,
        routing::build_router,
        test_utils::test_store,
        transaction::{TransactionForm, TransactionStore},
    };

    fn test_server(store: TransactionStore) -> TestServer {
        let state = AppState::new(store, "Etc/UTC").expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_each_tab() {
        let server = test_server(test_store());

        for path in ["/dashboard", "/transactions", "/analytics", "/transactions/new"] {
            server.get(path).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn serves_tabs_with_form_open() {
        let server = test_server(test_store());

        for path in ["/dashboard", "/transactions", "/analytics"] {
            server
                .get(path)
                .add_query_param("new", "true")
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = test_server(test_store());

        server.get("/nope").await.assert_status_not_found();
        server
            .get("/transactions/42/edit")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn add_list_and_delete_round_trip() {
        let store = test_store();
        let server = test_server(store.clone());

        server
            .post("/api/transactions")
            .add_query_param("redirect_url", "/dashboard")
            .form(&TransactionForm {
                transaction_type: "income".to_owned(),
                amount: "1500".to_owned(),
                category: "Salary".to_owned(),
                description: "March pay".to_owned(),
                date: "2025-03-31".to_owned(),
            })
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let listed = server.get("/api/transactions").await;
        listed.assert_status_ok();
        let transactions: serde_json::Value = listed.json();
        assert_eq!(transactions.as_array().map(Vec::len), Some(1));
        let id = transactions[0]["id"].as_i64().unwrap();

        server
            .delete(&format!("/api/transactions/{id}"))
            .await
            .assert_status_ok();
        server
            .delete(&format!("/api/transactions/{id}"))
            .await
            .assert_status_ok();
        assert_eq!(store.count(), Ok(0));
    }

    #[tokio::test]
    async fn invalid_form_is_unprocessable() {
        let store = test_store();
        let server = test_server(store.clone());

        server
            .post("/api/transactions")
            .form(&TransactionForm {
                transaction_type: "expense".to_owned(),
                amount: "-5".to_owned(),
                ..Default::default()
            })
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.count(), Ok(0));
    }
}
