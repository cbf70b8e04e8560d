//! Integration tests for entity clients using wiremock.

use assert2::{check, let_assert};
use logo_objects::entities::{Arp, ItemField, SalesOrder, SeriLot};
use logo_objects::{
    Error, HyperClient, LogoClient, OperationCall, Operators, QueryOptions, SearchCriteria,
    SortDirection, build_search_query,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param, query_param_is_missing},
};

async fn setup() -> (MockServer, LogoClient) {
    let server = MockServer::start().await;
    let client = LogoClient::new(HyperClient::new(), format!("{}/api/v1", server.uri()))
        .expect("client");
    (server, client)
}

#[tokio::test]
async fn get_all_sends_query_options() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/SalesOrders"))
        .and(header("Accept", "application/json"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(query_param("sort", "DATE_ desc"))
        .and(query_param("fields", "NUMBER,ARP_CODE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"NUMBER": "SO-1", "ARP_CODE": "C-001"},
                {"NUMBER": "SO-2", "ARP_CODE": "C-002", "PAYMENT_CODE": "30D"}
            ],
            "count": 2,
            "totalCount": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = QueryOptions::new()
        .limit(10)
        .offset(0)
        .fields(["NUMBER", "ARP_CODE"])
        .sort(("DATE_", SortDirection::Desc));
    let page = client.sales_orders().get_all(&options).await.expect("page");

    check!(page.len() == 2);
    check!(page.total_count == Some(12));
    let_assert!(Some(second) = page.items.get(1));
    check!(second.number.as_deref() == Some("SO-2"));
    check!(second.extra.get("PAYMENT_CODE") == Some(&json!("30D")));
}

#[tokio::test]
async fn get_by_id_decodes_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Arps/17"))
        .and(query_param("expandLevel", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "INTERNAL_REFERENCE": 17,
            "CODE": "C-001",
            "TITLE": "Acme Ltd"
        })))
        .mount(&server)
        .await;

    let arp = client
        .arps()
        .get_by_id(17, &QueryOptions::new().expand_level("full"))
        .await
        .expect("arp");

    check!(arp.internal_reference == Some(17));
    check!(arp.title.as_deref() == Some("Acme Ltd"));
}

#[tokio::test]
async fn get_by_id_not_found_keeps_vendor_payload() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Items/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"Message": "Record not found"})),
        )
        .mount(&server)
        .await;

    let result = client.items().get_by_id(999, &QueryOptions::new()).await;

    let_assert!(Err(err) = result);
    check!(err.is_not_found());
    check!(err.vendor_message().as_deref() == Some("Record not found"));
}

#[tokio::test]
async fn crud_uses_expected_verbs() {
    let (server, client) = setup().await;
    let arp = Arp {
        code: Some("C-009".to_string()),
        title: Some("Globex".to_string()),
        ..Arp::default()
    };

    Mock::given(method("POST"))
        .and(path("/api/v1/Arps"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"CODE": "C-009", "TITLE": "Globex"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "INTERNAL_REFERENCE": 5,
            "CODE": "C-009",
            "TITLE": "Globex"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/Arps/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/Arps/5"))
        .and(body_json(json!({"TITLE": "Globex Corp"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TITLE": "Globex Corp"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/Arps/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let arps = client.arps();

    let created = arps.create(&arp).await.expect("create");
    let_assert!(Some(created) = created);
    check!(created.internal_reference == Some(5));

    let updated = arps.update(5, &arp).await.expect("update");
    check!(updated.is_none());

    let patched = arps
        .patch(5, &json!({"TITLE": "Globex Corp"}))
        .await
        .expect("patch");
    check!(patched.and_then(|a| a.title).as_deref() == Some("Globex Corp"));

    arps.delete(5).await.expect("delete");
}

#[tokio::test]
async fn search_builds_filter_from_catalogue_names() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/SalesOrders"))
        .and(query_param(
            "q",
            "ARP_CODE eq 'C-001' and (STATUS eq 1 or STATUS eq 4) and TOTAL_NET gte 100",
        ))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let criteria = SearchCriteria::new()
        .with("arpCode", "C-001")
        .with("status", vec![1, 4])
        .with("TOTAL_NET", Operators::new().gte(100));
    let page = client
        .sales_orders()
        .search(&criteria, QueryOptions::new().limit(5))
        .await
        .expect("page");

    check!(page.is_empty());
}

#[tokio::test]
async fn search_without_clauses_omits_q() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Contacts"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let criteria = SearchCriteria::new().with_optional("name", None::<&str>);
    let page = client
        .contacts()
        .search(&criteria, QueryOptions::new())
        .await
        .expect("page");

    check!(page.is_empty());
}

#[tokio::test]
async fn search_rejects_unknown_field_before_sending() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let criteria = SearchCriteria::new().with("nickName", "x");
    let result = client.contacts().search(&criteria, QueryOptions::new()).await;

    let_assert!(Err(Error::UnknownField { resource, field }) = result);
    check!(resource == "Contacts");
    check!(field == "nickName");
}

#[tokio::test]
async fn dot_segment_ids_never_leave_the_resource() {
    let (server, client) = setup().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let arps = client.arps();
    let_assert!(Err(Error::InvalidRequest(_)) = arps.get_by_id("..", &QueryOptions::new()).await);
    let_assert!(Err(Error::InvalidRequest(_)) = arps.delete(".").await);
    let_assert!(Err(Error::InvalidRequest(_)) = arps.update("..", &json!({"CODE": "C-1"})).await);
    let_assert!(Err(Error::InvalidRequest(_)) = arps.patch(".", &json!({"CODE": "C-1"})).await);
}

#[tokio::test]
async fn unlisted_attribute_filters_through_get_all() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Contacts"))
        .and(query_param("q", "FAX eq '555'"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [{"CODE": "K-1", "FAX": "555"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let criteria = SearchCriteria::new().with("fax", "555");
    let options = QueryOptions::new().filter(build_search_query(&criteria));
    let page = client.contacts().get_all(&options).await.expect("contacts");

    let_assert!([contact] = page.items.as_slice());
    check!(contact.code.as_deref() == Some("K-1"));
    check!(contact.extra.get("FAX") == Some(&json!("555")));
}

#[tokio::test]
async fn search_helpers_use_prefix_match() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/Items"))
        .and(query_param("q", "NAME like 'Bolt*'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"NAME": "Bolt M8"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/Items"))
        .and(query_param("q", "GROUP_CODE like 'FAS*'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let items = client.items();
    let page = items
        .search_by_name("Bolt", QueryOptions::new())
        .await
        .expect("page");
    check!(page.len() == 1);

    items
        .search_by_prefix(ItemField::GroupCode, "FAS", QueryOptions::new())
        .await
        .expect("page");
}

#[tokio::test]
async fn search_by_name_without_name_field() {
    let (_server, client) = setup().await;

    let result = client
        .sales_orders()
        .search_by_name("x", QueryOptions::new())
        .await;

    let_assert!(Err(Error::UnknownField { resource, .. }) = result);
    check!(resource == "SalesOrders");
}

#[tokio::test]
async fn invoke_renders_route_template() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/SalesOrders/42/ApplyCampaign/SUMMER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"applied": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .sales_orders()
        .invoke(
            "ApplyCampaign",
            OperationCall::new()
                .path_param("id", 42)
                .path_param("campaignCode", "SUMMER"),
        )
        .await
        .expect("invoke");

    check!(result == json!({"applied": true}));
}

#[tokio::test]
async fn invoke_with_body() {
    let (server, client) = setup().await;
    let lots = vec![SeriLot {
        line_no: Some(1),
        code: Some("LOT-7".to_string()),
        quantity: Some(3.0),
        ..SeriLot::default()
    }];

    Mock::given(method("POST"))
        .and(path("/api/v1/ItemSlips/8/AddSeriLots"))
        .and(body_json(json!([{"LINE_NO": 1, "CODE": "LOT-7", "QUANTITY": 3.0}])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let slips = client.item_slips();

    let missing_body = slips
        .invoke("AddSeriLots", OperationCall::new().path_param("id", 8))
        .await;
    let_assert!(Err(Error::InvalidRequest(_)) = missing_body);

    let call = OperationCall::new()
        .path_param("id", 8)
        .json(&lots)
        .expect("body");
    let result = slips.invoke("AddSeriLots", call).await.expect("invoke");
    check!(result.is_null());
}

#[tokio::test]
async fn invoke_as_decodes_typed_answer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/SalesOrders/3/ExportToXmlStr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("<SALES_ORDERS/>")))
        .mount(&server)
        .await;

    let xml: String = client
        .sales_orders()
        .invoke_as("ExportToXmlStr", OperationCall::new().path_param("id", 3))
        .await
        .expect("xml");

    check!(xml == "<SALES_ORDERS/>");
}

#[tokio::test]
async fn invoke_rejects_unknown_operation_and_missing_parameter() {
    let (_server, client) = setup().await;
    let orders = client.sales_orders();

    let result = orders.invoke("Explode", OperationCall::new()).await;
    let_assert!(Err(Error::UnknownOperation { resource, operation }) = result);
    check!(resource == "SalesOrders");
    check!(operation == "Explode");

    let result = orders
        .invoke("ApplyCampaign", OperationCall::new().path_param("id", 1))
        .await;
    let_assert!(Err(Error::MissingPathParameter { name, .. }) = result);
    check!(name == "campaignCode");
}

#[tokio::test]
async fn invoke_keeps_query_params_set_before_options() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/SalesOrders/5/ExportToXmlStr"))
        .and(query_param("exportType", "1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("<SALES_ORDERS/>")))
        .expect(1)
        .mount(&server)
        .await;

    let call = OperationCall::new()
        .path_param("id", 5)
        .query_param("exportType", 1)
        .query(QueryOptions::new().limit(1));
    let xml: String = client
        .sales_orders()
        .invoke_as("ExportToXmlStr", call)
        .await
        .expect("export");
    check!(xml == "<SALES_ORDERS/>");
}

#[tokio::test]
async fn operations_lists_route_table() {
    let (_server, client) = setup().await;
    let names: Vec<_> = client
        .sales_orders()
        .operations()
        .iter()
        .map(|route| route.name)
        .collect();
    check!(names.contains(&"ApplyCampaign"));
    check!(names.contains(&"ExportToXmlStr"));
}

#[tokio::test]
async fn send_is_the_raw_collaborator() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/SalesOrders"))
        .and(body_json(json!({"NUMBER": "~"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"NUMBER": "SO-77"})))
        .mount(&server)
        .await;

    let order: SalesOrder = client
        .send(
            logo_objects::Method::Post,
            "/SalesOrders",
            Some(&json!({"NUMBER": "~"})),
        )
        .await
        .expect("order");

    check!(order.number.as_deref() == Some("SO-77"));
}
