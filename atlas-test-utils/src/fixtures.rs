//! JSON bodies shaped like Jira and Confluence responses
//!
//! Only the fields the audits read are filled in, plus the odd extra field
//! real responses carry so deserialization is exercised against noise.

use serde_json::{Value, json};

/// A Confluence space
pub fn space(key: &str, name: &str) -> Value {
  json!({
    "id": 98_304,
    "key": key,
    "name": name,
    "type": "global",
    "status": "current",
  })
}

/// A cursor-linked page of results
pub fn cursor_page(results: Vec<Value>, next: Option<&str>) -> Value {
  let size = results.len();
  let mut links = json!({ "base": "https://example.atlassian.net/wiki", "context": "/wiki" });
  if let Some(next) = next {
    links["next"] = json!(next);
  }

  json!({
    "results": results,
    "start": 0,
    "limit": size,
    "size": size,
    "_links": links,
  })
}

/// A content search response
pub fn content_search(results: Vec<Value>) -> Value {
  let size = results.len();
  json!({
    "results": results,
    "start": 0,
    "limit": 1,
    "size": size,
    "totalSize": size,
  })
}

/// A page hit from a content search with `expand=version`
pub fn content_page(title: &str, when: &str, webui: &str) -> Value {
  json!({
    "id": "123456",
    "type": "page",
    "status": "current",
    "title": title,
    "version": { "number": 7, "when": when },
    "_links": { "webui": webui, "self": "https://example.atlassian.net/wiki/rest/api/content/123456" },
  })
}

/// An offset-paginated page of values
pub fn offset_page(values: Vec<Value>, start_at: u64, is_last: Option<bool>) -> Value {
  let size = values.len();
  let mut page = json!({
    "startAt": start_at,
    "maxResults": size,
    "total": start_at as usize + size,
    "values": values,
  });
  if let Some(is_last) = is_last {
    page["isLast"] = json!(is_last);
  }
  page
}

/// A project from the project search listing
pub fn project(key: &str, name: &str) -> Value {
  json!({
    "id": "10000",
    "key": key,
    "name": name,
    "projectTypeKey": "software",
  })
}

/// A project detail response declaring the given issue types
pub fn project_detail(key: &str, name: &str, issue_types: &[&str]) -> Value {
  let types: Vec<Value> = issue_types
    .iter()
    .enumerate()
    .map(|(i, name)| json!({ "id": (10_000 + i).to_string(), "name": name, "subtask": false }))
    .collect();

  json!({
    "id": "10000",
    "key": key,
    "name": name,
    "issueTypes": types,
  })
}

/// A project role map pointing at `base`
pub fn role_map(base: &str, project_key: &str, roles: &[(&str, u64)]) -> Value {
  let mut map = serde_json::Map::new();
  for (name, id) in roles {
    map.insert(
      (*name).to_string(),
      json!(format!("{base}/rest/api/3/project/{project_key}/role/{id}")),
    );
  }
  Value::Object(map)
}

/// A project role with actors
pub fn role(name: &str, actors: Vec<Value>) -> Value {
  json!({
    "self": "https://example.atlassian.net/rest/api/3/project/P1/role/10002",
    "name": name,
    "id": 10_002,
    "actors": actors,
  })
}

/// A user role actor
pub fn user_actor(display_name: &str) -> Value {
  json!({
    "id": 10_240,
    "displayName": display_name,
    "type": "atlassian-user-role-actor",
    "actorUser": { "accountId": "5b10a2844c20165700ede21g" },
  })
}

/// A group role actor
pub fn group_actor(name: &str) -> Value {
  json!({
    "id": 10_241,
    "displayName": name,
    "type": "atlassian-group-role-actor",
    "name": name,
    "actorGroup": { "name": name, "displayName": name },
  })
}

/// A permission scheme summary
pub fn permission_scheme_summary(id: u64, name: &str) -> Value {
  json!({ "id": id, "name": name, "self": format!("https://example.atlassian.net/rest/api/3/permissionscheme/{id}") })
}

/// A permission scheme with grants
pub fn permission_scheme(id: u64, name: &str, permissions: Vec<Value>) -> Value {
  json!({ "id": id, "name": name, "permissions": permissions })
}

/// A permission grant with one holder
pub fn grant(permission: &str, holder: Value) -> Value {
  json!({ "id": 10_000, "permission": permission, "holder": holder })
}
