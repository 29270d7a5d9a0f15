use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::items::services::ItemService;

/// Body for changing an item's tax template selection. `null` clears the
/// selection and empties the item's tax table.
#[derive(Debug, Deserialize)]
pub struct SetTaxTemplateRequest {
    pub tax_template: Option<String>,
}

/// Get an item with its tax rows
/// GET /items/{name}
pub async fn get_item(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item = service.get_item(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Select or clear an item's tax template
/// PUT /items/{name}/tax-template
pub async fn set_tax_template(
    service: web::Data<Arc<ItemService>>,
    path: web::Path<String>,
    request: web::Json<SetTaxTemplateRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service
        .set_tax_template(&path.into_inner(), request.into_inner().tax_template)
        .await?;

    Ok(HttpResponse::Ok().json(item))
}

/// Configure item routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/items")
            .route("/{name}", web::get().to(get_item))
            .route("/{name}/tax-template", web::put().to(set_tax_template)),
    );
}
