use std::time::Instant;

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, alert::Alert, api::ApiClient};

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The client that the CSV files are forwarded to.
    pub api_client: ApiClient,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
        }
    }
}

/// Route handler for importing transactions from CSV files.
///
/// Every file in the form is uploaded to the transactions API in turn. The
/// upload stops at the first file that is rejected.
pub async fn import_transactions(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Response {
    let start_time = Instant::now();

    match forward_files(&state.api_client, &mut multipart).await {
        Ok(file_count) => {
            tracing::info!(
                "Forwarded {file_count} CSV files to the transactions API in {}ms",
                start_time.elapsed().as_millis()
            );

            let details = if file_count == 1 {
                "1 arquivo foi enviado para a API.".to_owned()
            } else {
                format!("{file_count} arquivos foram enviados para a API.")
            };

            (
                StatusCode::CREATED,
                Alert::Success {
                    message: "Importação concluída!".to_owned(),
                    details,
                },
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

async fn forward_files(api_client: &ApiClient, multipart: &mut Multipart) -> Result<usize, Error> {
    let mut file_count = 0;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    })? {
        let (file_name, contents) = read_csv_field(field).await?;
        api_client.import_transactions(file_name, contents).await?;
        file_count += 1;
    }

    if file_count == 0 {
        return Err(Error::MultipartError(
            "O formulário não contém nenhum arquivo.".to_owned(),
        ));
    }

    Ok(file_count)
}

async fn read_csv_field(field: Field<'_>) -> Result<(String, Vec<u8>), Error> {
    let Some(file_name) = field.file_name().map(ToOwned::to_owned) else {
        tracing::error!("Could not get file name from multipart form field: {field:#?}");
        return Err(Error::MultipartError(
            "Não foi possível ler o nome do arquivo.".to_owned(),
        ));
    };

    // Some browsers send CSV files as "application/vnd.ms-excel".
    let is_csv = field.content_type() == Some("text/csv")
        || file_name.to_lowercase().ends_with(".csv");

    if !is_csv {
        return Err(Error::NotCSV);
    }

    let contents = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Não foi possível ler o conteúdo do arquivo.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, contents.len());

    Ok((file_name, contents.to_vec()))
}
