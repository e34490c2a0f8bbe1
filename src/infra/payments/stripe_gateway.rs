//! Stripe integration via REST API (no SDK dependency).

use crate::domain::models::member::Member;
use crate::domain::models::payment::CheckoutSession;
use crate::domain::models::plan::Plan;
use crate::domain::ports::PaymentGateway;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

pub struct StripeGateway {
    client: Client,
    secret_key: String,
    app_base_url: String,
}

impl StripeGateway {
    pub fn new(secret_key: String, app_base_url: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            app_base_url,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        member: &Member,
        plan: Plan,
    ) -> Result<CheckoutSession, AppError> {
        let success_url = format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", self.app_base_url);
        let cancel_url = format!("{}/dashboard", self.app_base_url);
        let amount = plan.price_cents().to_string();
        let product_name = format!("Elit Gym - {}", plan.label());

        let resp: serde_json::Value = self.client
            .post("https://api.stripe.com/v1/checkout/sessions")
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("mode", "payment"),
                ("payment_method_types[0]", "card"),
                ("line_items[0][price_data][currency]", "usd"),
                ("line_items[0][price_data][product_data][name]", &product_name),
                ("line_items[0][price_data][product_data][description]", plan.description()),
                ("line_items[0][price_data][unit_amount]", &amount),
                ("line_items[0][quantity]", "1"),
                ("success_url", &success_url),
                ("cancel_url", &cancel_url),
                ("client_reference_id", &member.id),
                ("metadata[member_id]", &member.id),
                ("metadata[member_name]", &member.name),
                ("metadata[plan]", plan.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Stripe connection error: {}", e);
                AppError::Gateway(format!("Stripe connection error: {}", e))
            })?
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Stripe response decode error: {}", e)))?;

        match (resp["id"].as_str(), resp["url"].as_str()) {
            (Some(id), Some(url)) => Ok(CheckoutSession {
                id: id.to_string(),
                url: url.to_string(),
            }),
            _ => {
                error!("Stripe checkout session creation failed: {}", resp);
                Err(AppError::Gateway("Stripe checkout session creation failed".to_string()))
            }
        }
    }
}
