use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::tax_templates::repositories::TaxTemplateReader;

/// Get a tax template with its tax rows
/// GET /tax-templates/{name}
pub async fn get_tax_template(
    templates: web::Data<Arc<dyn TaxTemplateReader>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let template = templates
        .find_by_name(&name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tax template {}", name)))?;

    Ok(HttpResponse::Ok().json(template))
}

/// Configure tax template routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tax-templates").route("/{name}", web::get().to(get_tax_template)),
    );
}
