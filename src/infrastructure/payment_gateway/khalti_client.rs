use std::time::Duration;

use anyhow::{Result, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::error;

use crate::{
    config::config_model::Khalti,
    domain::{
        entities::plans::PlanEntity,
        value_objects::payments::{
            CustomerInfo, GatewayInitiateRequest, GatewayInitiateResponse, minor_units,
        },
    },
};

/// Minimal Khalti checkout client built on reqwest.
pub struct KhaltiClient {
    http: reqwest::Client,
    initiate_url: String,
    secret_key: String,
    return_url: String,
    website_url: String,
}

#[derive(Debug, Deserialize)]
struct KhaltiErrorEnvelope {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error_key: Option<String>,
}

impl KhaltiClient {
    pub fn new(config: &Khalti) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            initiate_url: config.initiate_url.clone(),
            secret_key: config.secret_key.clone(),
            return_url: config.return_url.clone(),
            website_url: config.website_url.clone(),
        })
    }

    pub fn build_request(&self, plan: &PlanEntity, customer: CustomerInfo) -> GatewayInitiateRequest {
        GatewayInitiateRequest {
            return_url: self.return_url.clone(),
            website_url: self.website_url.clone(),
            amount: minor_units(plan.amount),
            purchase_order_id: plan.id.to_string(),
            purchase_order_name: plan.plan_name.clone(),
            customer_info: customer,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (khalti_detail, khalti_error_key) =
            match serde_json::from_str::<KhaltiErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.detail, envelope.error_key),
                Err(_) => (None, None),
            };

        error!(
            status = %status,
            khalti_detail = ?khalti_detail,
            khalti_error_key = ?khalti_error_key,
            response_body = %body,
            context = %context,
            "khalti api request failed"
        );

        bail!("Khalti API request failed: {} (status {})", context, status);
    }

    /// Opens a checkout session for `plan` and returns its `pidx` and redirect URL.
    pub async fn initiate_payment(
        &self,
        plan: &PlanEntity,
        customer: CustomerInfo,
    ) -> Result<GatewayInitiateResponse> {
        let body = self.build_request(plan, customer);

        let resp = self
            .http
            .post(&self.initiate_url)
            .header(AUTHORIZATION, format!("Key {}", self.secret_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "initiate payment").await?;

        let parsed: GatewayInitiateResponse = resp.json().await?;
        if parsed.pidx.trim().is_empty() {
            bail!("Khalti initiate response is missing pidx");
        }
        Ok(parsed)
    }
}
