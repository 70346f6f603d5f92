//! Purchase request rules.
//!
//! Checks run in a fixed order and the first failing rule is reported:
//! empty request, account id, line item shape, unknown ticket type,
//! missing adult, ticket ceiling.
//!
//! A whole JSON body is accepted by [`validate_purchase_body`]. A missing or
//! null `ticketTypeRequests` counts as an empty request; any other non-list
//! value fails the shape check once the account id has passed.

use serde_json::Value;
use turnstile_catalog::{TicketPolicy, TicketTypeRequest};
use turnstile_core::AccountId;

use crate::error::PurchaseError;

/// Validate a typed purchase request against the policy.
pub fn validate_purchase(
    policy: &TicketPolicy,
    account_id: i64,
    requests: &[TicketTypeRequest],
) -> Result<AccountId, PurchaseError> {
    if requests.is_empty() {
        return Err(PurchaseError::NoLineItems);
    }
    let account_id = AccountId::new(account_id)?;
    check_business_rules(policy, requests)?;
    Ok(account_id)
}

/// Validate a purchase whose arguments arrived as untyped JSON, returning
/// the parsed line items on success.
pub fn validate_untyped_purchase(
    policy: &TicketPolicy,
    account_id: &Value,
    requests: &[Value],
) -> Result<(AccountId, Vec<TicketTypeRequest>), PurchaseError> {
    if requests.is_empty() {
        return Err(PurchaseError::NoLineItems);
    }
    let account_id = AccountId::from_value(account_id)?;
    let requests = parse_line_items(requests)?;
    check_business_rules(policy, &requests)?;
    Ok((account_id, requests))
}

/// Validate a purchase body of the form
/// `{"accountId": .., "ticketTypeRequests": [..]}`.
///
/// Bodies that are not JSON objects carry neither field and are reported as
/// an empty request.
pub fn validate_purchase_body(
    policy: &TicketPolicy,
    body: &Value,
) -> Result<(AccountId, Vec<TicketTypeRequest>), PurchaseError> {
    let account_id = body.get("accountId").unwrap_or(&Value::Null);
    match body.get("ticketTypeRequests") {
        None | Some(Value::Null) => Err(PurchaseError::NoLineItems),
        Some(Value::Array(requests)) => validate_untyped_purchase(policy, account_id, requests),
        Some(other) => {
            AccountId::from_value(account_id)?;
            Err(PurchaseError::LineItemsNotAList(other.to_string()))
        }
    }
}

pub fn parse_line_items(requests: &[Value]) -> Result<Vec<TicketTypeRequest>, PurchaseError> {
    requests
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            TicketTypeRequest::from_value(raw).map_err(|source| PurchaseError::MalformedLineItem { index, source })
        })
        .collect()
}

fn check_business_rules(policy: &TicketPolicy, requests: &[TicketTypeRequest]) -> Result<(), PurchaseError> {
    if let Some(unknown) = requests.iter().find(|r| policy.rule(r.ticket_type()).is_none()) {
        return Err(PurchaseError::UnknownTicketType(unknown.ticket_type().clone()));
    }

    if !requests.iter().any(|r| r.ticket_type().is_adult()) {
        return Err(PurchaseError::AdultRequired);
    }

    let requested: u64 = requests.iter().map(|r| u64::from(r.count())).sum();
    if requested > u64::from(policy.maximum_tickets()) {
        return Err(PurchaseError::TooManyTickets {
            requested,
            maximum: policy.maximum_tickets(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use turnstile_catalog::{PolicyDefinition, TicketType};

    fn request(ticket_type: TicketType, count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(ticket_type, count).unwrap()
    }

    #[test]
    fn test_valid_purchase() {
        let policy = TicketPolicy::default();
        let requests = [request(TicketType::ADULT, 2), request(TicketType::INFANT, 1)];
        assert_eq!(validate_purchase(&policy, 5, &requests).unwrap().get(), 5);
    }

    #[test]
    fn test_empty_request_checked_first() {
        let policy = TicketPolicy::default();
        assert!(matches!(validate_purchase(&policy, 0, &[]), Err(PurchaseError::NoLineItems)));
    }

    #[test]
    fn test_account_id_must_be_positive() {
        let policy = TicketPolicy::default();
        let requests = [request(TicketType::ADULT, 1)];
        for bad in [0, -1, i64::MIN] {
            assert!(matches!(
                validate_purchase(&policy, bad, &requests),
                Err(PurchaseError::InvalidAccountId(_))
            ));
        }
    }

    #[test]
    fn test_adult_required() {
        let policy = TicketPolicy::default();
        for requests in [
            vec![request(TicketType::CHILD, 1)],
            vec![request(TicketType::INFANT, 1)],
            vec![request(TicketType::CHILD, 2), request(TicketType::INFANT, 2)],
        ] {
            assert!(matches!(
                validate_purchase(&policy, 1, &requests),
                Err(PurchaseError::AdultRequired)
            ));
        }
    }

    #[test]
    fn test_ceiling_counts_every_line_item() {
        let policy = TicketPolicy::default();

        let at_limit = [request(TicketType::ADULT, 1), request(TicketType::INFANT, 19)];
        assert!(validate_purchase(&policy, 1, &at_limit).is_ok());

        let over = [
            request(TicketType::ADULT, 10),
            request(TicketType::ADULT, 10),
            request(TicketType::INFANT, 1),
        ];
        assert!(matches!(
            validate_purchase(&policy, 1, &over),
            Err(PurchaseError::TooManyTickets { requested: 21, maximum: 20 })
        ));
    }

    #[test]
    fn test_unknown_ticket_type() {
        let policy = TicketPolicy::default();
        let senior = TicketType::parse("SENIOR").unwrap();
        let requests = [request(TicketType::ADULT, 1), request(senior.clone(), 1)];
        match validate_purchase(&policy, 1, &requests) {
            Err(PurchaseError::UnknownTicketType(found)) => assert_eq!(found, senior),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_custom_ceiling() {
        let policy = TicketPolicy::from_definition(PolicyDefinition {
            maximum_tickets: 1,
            ..PolicyDefinition::default()
        })
        .unwrap();
        assert!(validate_purchase(&policy, 1, &[request(TicketType::ADULT, 1)]).is_ok());
        assert!(validate_purchase(&policy, 1, &[request(TicketType::ADULT, 2)]).is_err());
    }

    #[test]
    fn test_untyped_purchase() {
        let policy = TicketPolicy::default();
        let (account_id, requests) = validate_untyped_purchase(
            &policy,
            &json!(9),
            &[json!({"type": "ADULT", "count": 2}), json!({"type": "CHILD", "count": 1})],
        )
        .unwrap();
        assert_eq!(account_id.get(), 9);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].ticket_type(), &TicketType::CHILD);
    }

    #[test]
    fn test_untyped_rule_order() {
        let policy = TicketPolicy::default();
        let adult = json!({"type": "ADULT", "count": 1});

        assert!(matches!(
            validate_untyped_purchase(&policy, &json!("x"), &[]),
            Err(PurchaseError::NoLineItems)
        ));
        assert!(matches!(
            validate_untyped_purchase(&policy, &json!("1"), &[json!("garbage")]),
            Err(PurchaseError::InvalidAccountId(_))
        ));
        assert!(matches!(
            validate_untyped_purchase(&policy, &json!(1.5), &[adult.clone()]),
            Err(PurchaseError::InvalidAccountId(_))
        ));
        assert!(matches!(
            validate_untyped_purchase(&policy, &json!(1), &[adult.clone(), json!("garbage")]),
            Err(PurchaseError::MalformedLineItem { index: 1, .. })
        ));
        assert!(matches!(
            validate_untyped_purchase(&policy, &json!(1), &[json!({"type": "CHILD", "count": 1})]),
            Err(PurchaseError::AdultRequired)
        ));
    }

    #[test]
    fn test_purchase_body() {
        let policy = TicketPolicy::default();
        let body = json!({"accountId": 3.0, "ticketTypeRequests": [{"type": "ADULT", "count": 2.0}]});
        let (account_id, requests) = validate_purchase_body(&policy, &body).unwrap();
        assert_eq!(account_id.get(), 3);
        assert_eq!(requests[0].count(), 2);
    }

    #[test]
    fn test_purchase_body_shape() {
        let policy = TicketPolicy::default();

        for empty in [
            json!({"accountId": 1}),
            json!({"accountId": 1, "ticketTypeRequests": null}),
            json!([1]),
            json!(null),
            json!("ADULT"),
        ] {
            assert!(
                matches!(validate_purchase_body(&policy, &empty), Err(PurchaseError::NoLineItems)),
                "body {}",
                empty
            );
        }

        for not_a_list in [json!("ADULT"), json!({"type": "ADULT", "count": 1}), json!(3)] {
            let body = json!({"accountId": 1, "ticketTypeRequests": not_a_list});
            assert!(
                matches!(validate_purchase_body(&policy, &body), Err(PurchaseError::LineItemsNotAList(_))),
                "body {}",
                body
            );
        }

        let body = json!({"accountId": 0, "ticketTypeRequests": "ADULT"});
        assert!(matches!(
            validate_purchase_body(&policy, &body),
            Err(PurchaseError::InvalidAccountId(_))
        ));
    }
}
