use crate::{NewCheckoutSession, StripeApiError, StripeErrorBody};

/// Flattens a checkout session request into Stripe's bracketed form-encoding convention, e.g.
/// `line_items[0][price_data][unit_amount]=5000`.
///
/// Prices are forwarded verbatim as integer minor units. Requests with no line items, non-positive quantities or
/// negative prices are rejected before anything is sent over the wire.
pub fn checkout_session_form(
    session: &NewCheckoutSession,
    success_url: &str,
    cancel_url: &str,
    currency: &str,
) -> Result<Vec<(String, String)>, StripeApiError> {
    if session.line_items.is_empty() {
        return Err(StripeApiError::InvalidRequest("A checkout session needs at least one line item".into()));
    }
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("success_url".to_string(), success_url.to_string()),
        ("cancel_url".to_string(), cancel_url.to_string()),
    ];
    if let Some(reference) = &session.client_reference_id {
        form.push(("client_reference_id".into(), reference.clone()));
    }
    if let Some(email) = session.customer_email.as_ref().filter(|e| !e.trim().is_empty()) {
        form.push(("customer_email".into(), email.clone()));
    }
    for (i, item) in session.line_items.iter().enumerate() {
        if item.quantity <= 0 {
            return Err(StripeApiError::InvalidRequest(format!(
                "Line item '{}' has an invalid quantity of {}",
                item.name, item.quantity
            )));
        }
        if item.unit_amount < 0 {
            return Err(StripeApiError::InvalidRequest(format!(
                "Line item '{}' has a negative unit amount",
                item.name
            )));
        }
        if item.name.trim().is_empty() {
            return Err(StripeApiError::InvalidRequest(format!("Line item #{i} has no name")));
        }
        let prefix = format!("line_items[{i}]");
        form.push((format!("{prefix}[price_data][currency]"), currency.to_string()));
        form.push((format!("{prefix}[price_data][unit_amount]"), item.unit_amount.to_string()));
        form.push((format!("{prefix}[price_data][product_data][name]"), item.name.clone()));
        // Stripe rejects empty strings for optional product fields, so they are omitted instead
        if !item.description.trim().is_empty() {
            form.push((format!("{prefix}[price_data][product_data][description]"), item.description.clone()));
        }
        if let Some(image) = item.image.as_ref().filter(|s| !s.trim().is_empty()) {
            form.push((format!("{prefix}[price_data][product_data][images][0]"), image.clone()));
        }
        form.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
    }
    Ok(form)
}

/// Produces a readable message from an error payload returned by Stripe.
pub fn describe_stripe_error(body: &StripeErrorBody) -> String {
    let message = body.message.clone().unwrap_or_else(|| "No message provided".to_string());
    match (&body.error_type, &body.code) {
        (Some(t), Some(c)) => format!("{message} ({t}/{c})"),
        (Some(t), None) => format!("{message} ({t})"),
        (None, Some(c)) => format!("{message} ({c})"),
        (None, None) => message,
    }
}
