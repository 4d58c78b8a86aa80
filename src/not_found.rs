//! The page shown for routes that do not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    let page = error_view(
        "Página não encontrada",
        "404",
        "Página não encontrada.",
        "Verifique o endereço ou volte para a listagem.",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}
