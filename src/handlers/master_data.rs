use axum::{
    extract::{Path, State},
    response::Json,
};
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog,
    error::AppError,
    models::{NewProduct, Product},
    store::SharedStore,
};

use super::ApiResponse;

#[derive(Deserialize)]
pub struct ImportRequest {
    pub products: Vec<NewProduct>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: u64,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub async fn products_list(
    State(store): State<SharedStore>,
) -> Result<Json<ApiResponse<Vec<Product>>>, AppError> {
    let products = store.list_products().await?;
    Ok(ApiResponse::new(products))
}

// Pre-parsed records, the path the scanner app's importer uses.
pub async fn import_products(
    State(store): State<SharedStore>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let imported = catalog::import_products(store.as_ref(), request.products).await?;
    Ok(Json(ImportResponse {
        success: true,
        imported,
    }))
}

// Raw CSV upload; the file arrives as a multipart field named "file".
pub async fn upload_products(
    State(store): State<SharedStore>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut csv_text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("invalid multipart body".to_string()))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name == "file" {
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("could not read uploaded file".to_string()))?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| AppError::Validation("uploaded file is not UTF-8 text".to_string()))?;
            csv_text = Some(text);
        }
    }

    let Some(csv_text) = csv_text else {
        return Err(AppError::Validation(
            "multipart field \"file\" is required".to_string(),
        ));
    };

    let products = catalog::parse_products_csv(&csv_text)?;
    let imported = catalog::import_products(store.as_ref(), products).await?;
    Ok(Json(ImportResponse {
        success: true,
        imported,
    }))
}

pub async fn delete_product(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !store.delete_product(id).await? {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    Ok(Json(DeleteResponse { success: true }))
}
