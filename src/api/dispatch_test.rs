use reqwest::Method;
use serde_json::{Value, json};

use super::dispatch::{Prepared, QueryParams, prepare, shape};
use super::error::ApiError;
use super::operations::{Reply, find};
use crate::todoist::{Endpoint, RemoteRequest, Resource};

fn query(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().copied().collect()
}

fn call(prepared: Result<Prepared, ApiError>) -> RemoteRequest {
    match prepared {
        Ok(Prepared::Call(request)) => request,
        other => panic!("expected a remote call, got {other:?}"),
    }
}

fn body(value: Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

#[test]
fn query_params_treat_empty_values_as_absent() {
    let params = query(&[("taskId", ""), ("label", "home")]);
    assert_eq!(params.get("taskId"), None);
    assert_eq!(params.get("label"), Some("home"));
    assert_eq!(params.require("taskId"), Err(ApiError::missing("taskId")));
}

#[test]
fn query_params_use_first_value() {
    let params = query(&[("taskId", "1"), ("taskId", "2")]);
    assert_eq!(params.get("taskId"), Some("1"));
}

#[test]
fn list_tasks_forwards_only_given_filters() {
    let op = find("/listTasks").unwrap();
    let request = call(prepare(op, &query(&[("label", "home"), ("projectId", "")]), b""));

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.endpoint, Endpoint::Collection(Resource::Tasks));
    assert_eq!(request.query, vec![("label".to_string(), "home".to_string())]);
    assert_eq!(request.body, None);
}

#[test]
fn get_task_requires_task_id() {
    let op = find("/getTask").unwrap();
    let err = prepare(op, &query(&[]), b"").unwrap_err();
    assert_eq!(err, ApiError::missing("taskId"));
    assert_eq!(err.to_string(), "taskId is required");
}

#[test]
fn dot_identifiers_are_rejected() {
    for id in [".", ".."] {
        let op = find("/deleteProject").unwrap();
        let err = prepare(op, &query(&[("projectId", id)]), b"").unwrap_err();
        assert_eq!(err, ApiError::missing("projectId"));

        let op = find("/updateTask").unwrap();
        let err = prepare(op, &query(&[]), &body(json!({ "taskId": id, "content": "x" })))
            .unwrap_err();
        assert_eq!(err, ApiError::missing("taskId"));
    }
}

#[test]
fn update_task_splits_identifier_from_payload() {
    let op = find("/updateTask").unwrap();
    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({ "taskId": "123", "content": "new" })),
    ));

    assert_eq!(request.method, Method::POST);
    assert_eq!(request.id.as_deref(), Some("123"));
    assert_eq!(request.body, Some(json!({ "content": "new" })));
}

#[test]
fn update_accepts_numeric_identifier() {
    let op = find("/updateLabel").unwrap();
    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({ "labelId": 42, "isFavorite": true })),
    ));

    assert_eq!(request.id.as_deref(), Some("42"));
    assert_eq!(request.body, Some(json!({ "is_favorite": true })));
}

#[test]
fn update_rejects_falsy_identifier() {
    let op = find("/updateProject").unwrap();
    for id in [json!(""), json!(0), json!(null), json!(false)] {
        let err = prepare(op, &query(&[]), &body(json!({ "projectId": id, "name": "x" })))
            .unwrap_err();
        assert_eq!(err.to_string(), "projectId is required");
    }
}

#[test]
fn body_must_be_a_json_object() {
    let op = find("/createProject").unwrap();
    let raws: [&[u8]; 3] = [b"", b"not json", b"[1,2]"];
    for raw in raws {
        let err = prepare(op, &query(&[]), raw).unwrap_err();
        assert_eq!(err.to_string(), "request body must be a JSON object");
    }
}

#[test]
fn create_task_keeps_whitelisted_fields_in_snake_case() {
    let op = find("/createTask").unwrap();
    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({
            "content": "Buy milk",
            "dueString": "tomorrow",
            "projectId": "p1",
            "labels": ["errands"],
            "isAdmin": true
        })),
    ));

    assert_eq!(
        request.body,
        Some(json!({
            "content": "Buy milk",
            "due_string": "tomorrow",
            "project_id": "p1",
            "labels": ["errands"]
        }))
    );
}

#[test]
fn create_project_forwards_whole_body() {
    let op = find("/createProject").unwrap();
    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({ "name": "Home", "parentId": "p0", "viewStyle": "board" })),
    ));

    assert_eq!(
        request.body,
        Some(json!({ "name": "Home", "parent_id": "p0", "view_style": "board" }))
    );
}

#[test]
fn list_sections_without_project_answers_empty_list() {
    let op = find("/listSections").unwrap();
    let prepared = prepare(op, &query(&[]), b"").unwrap();
    assert_eq!(prepared, Prepared::Reply(json!([])));
}

#[test]
fn list_comments_prefers_task_id() {
    let op = find("/listComments").unwrap();
    let request = call(prepare(
        op,
        &query(&[("projectId", "p1"), ("taskId", "t1")]),
        b"",
    ));
    assert_eq!(request.query, vec![("task_id".to_string(), "t1".to_string())]);
}

#[test]
fn list_comments_needs_a_scope() {
    let op = find("/listComments").unwrap();
    let err = prepare(op, &query(&[]), b"").unwrap_err();
    assert_eq!(err.to_string(), "taskId or projectId is required");
}

#[test]
fn create_comment_needs_task_or_project() {
    let op = find("/createComment").unwrap();
    let err = prepare(op, &query(&[]), &body(json!({ "content": "hi" }))).unwrap_err();
    assert_eq!(err.to_string(), "taskId or projectId is required");

    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({ "content": "hi", "projectId": "p1" })),
    ));
    assert_eq!(request.body, Some(json!({ "content": "hi", "project_id": "p1" })));
}

#[test]
fn shared_label_flag_only_forwards_true() {
    let op = find("/getSharedLabels").unwrap();

    let request = call(prepare(op, &query(&[("omitPersonal", "true")]), b""));
    assert_eq!(
        request.query,
        vec![("omit_personal".to_string(), "true".to_string())]
    );

    for value in ["false", "1", "TRUE"] {
        let request = call(prepare(op, &query(&[("omitPersonal", value)]), b""));
        assert!(request.query.is_empty(), "{value} should not be forwarded");
    }
}

#[test]
fn rename_shared_label_maps_new_name() {
    let op = find("/renameSharedLabel").unwrap();
    let request = call(prepare(
        op,
        &query(&[]),
        &body(json!({ "name": "old", "newName": "new", "extra": 1 })),
    ));
    assert_eq!(request.body, Some(json!({ "name": "old", "new_name": "new" })));
}

#[test]
fn rename_shared_label_requires_both_names() {
    let op = find("/renameSharedLabel").unwrap();
    let err = prepare(op, &query(&[]), &body(json!({ "name": "old" }))).unwrap_err();
    assert_eq!(err.to_string(), "newName is required");
}

#[test]
fn shape_follows_reply_kind() {
    let task = json!({ "id": "1", "project_id": "p1" });

    assert_eq!(
        shape(Reply::Resource, Some(task.clone())),
        Some(json!({ "id": "1", "projectId": "p1" }))
    );
    assert_eq!(shape(Reply::Resource, None), Some(json!(true)));
    assert_eq!(shape(Reply::Raw, Some(task.clone())), Some(task.clone()));
    assert_eq!(shape(Reply::Raw, None), None);
    assert_eq!(shape(Reply::Acknowledge, Some(task)), Some(json!(true)));
}
