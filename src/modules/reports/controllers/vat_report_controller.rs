use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::reports::services::{VatReportFilters, VatReportService};

/// Run the VAT report for a company and posting-date window
/// GET /reports/vat?company=...&from_date=...&to_date=...
pub async fn get_vat_report(
    service: web::Data<Arc<VatReportService>>,
    query: web::Query<VatReportFilters>,
) -> Result<HttpResponse, AppError> {
    let report = service.execute(&query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/vat", web::get().to(get_vat_report)));
}
