//! Test fixtures for XWiki REST responses
//!
//! Realistic JSON documents as served by an XWiki instance reachable at
//! `http://wiki.test` with the REST API under `/rest`.

use serde_json::{Value, json};

pub const API: &str = "/rest";
pub const MAIN_PAGES: &str = "/rest/wikis/xwiki/spaces/Main/pages";
pub const WEB_HOME: &str = "/rest/wikis/xwiki/spaces/Main/pages/WebHome";
pub const SANDBOX: &str = "/rest/wikis/xwiki/spaces/Main/pages/Sandbox";
pub const BROKEN: &str = "/rest/wikis/xwiki/spaces/Main/pages/Broken";
pub const ALICE: &str = "/rest/wikis/xwiki/spaces/XWiki/pages/alice";
pub const GROUP_SEARCH: &str = "/rest/wikis/xwiki/spaces/XWiki/search?q=Group&scope=name";
pub const ADMIN_GROUP_OBJECTS: &str = "/rest/wikis/xwiki/spaces/XWiki/pages/XWikiAdminGroup/objects";
pub const CURRENT_USER_GROUPS: &str = "/bin/view/XWiki/CurrentUserGroups";
pub const LOGO_DOWNLOAD: &str = "http://internal.example:8080/bin/download/Main/WebHome/logo.png";

fn rel(name: &str) -> String {
  format!("http://www.xwiki.org/rel/{name}")
}

fn link(name: &str, href: &str) -> Value {
  json!({ "rel": rel(name), "href": format!("http://wiki.test{href}") })
}

pub fn root_response() -> Value {
  json!({
    "links": [link("wikis", "/rest/wikis"), link("syntaxes", "/rest/syntaxes")],
    "version": "15.10.8"
  })
}

pub fn wikis_response() -> Value {
  json!({
    "links": [],
    "wikis": [
      {
        "id": "xwiki",
        "name": "xwiki",
        "description": "Main wiki",
        "owner": "XWiki.Admin",
        "links": [link("spaces", "/rest/wikis/xwiki/spaces")]
      },
      {
        "id": "dev",
        "name": "dev",
        "links": [link("spaces", "/rest/wikis/dev/spaces")]
      }
    ]
  })
}

fn page_summary(name: &str, title: &str) -> Value {
  json!({
    "id": format!("xwiki:Main.{name}"),
    "fullName": format!("Main.{name}"),
    "wiki": "xwiki",
    "space": "Main",
    "name": name,
    "title": title,
    "parent": "",
    "links": [link("page", &format!("{MAIN_PAGES}/{name}"))]
  })
}

pub fn main_pages_response() -> Value {
  json!({
    "links": [],
    "pageSummaries": [
      page_summary("WebHome", "Home"),
      page_summary("Broken", "Broken page"),
      page_summary("Sandbox", "Sandbox")
    ]
  })
}

pub fn web_home_response() -> Value {
  json!({
    "id": "xwiki:Main.WebHome",
    "fullName": "Main.WebHome",
    "wiki": "xwiki",
    "space": "Main",
    "name": "WebHome",
    "title": "Home",
    "version": "3.1",
    "majorVersion": 3,
    "minorVersion": 1,
    "author": "XWiki.Admin",
    "modified": 1_700_000_000_000_i64,
    "syntax": "xwiki/2.1",
    "content": "Welcome to your wiki.",
    "links": [
      link("space", "/rest/wikis/xwiki/spaces/Main"),
      link("objects", &format!("{WEB_HOME}/objects")),
      link("attachments", &format!("{WEB_HOME}/attachments"))
    ]
  })
}

pub fn web_home_objects_response() -> Value {
  json!({
    "links": [],
    "objectSummaries": [
      {
        "id": "xwiki:Main.WebHome:0",
        "className": "Main.DocumentClass",
        "number": 0,
        "headline": "Home",
        "links": [
          link("properties", &format!("{WEB_HOME}/objects/Main.DocumentClass/0/properties")),
          link("object", &format!("{WEB_HOME}/objects/Main.DocumentClass/0"))
        ]
      }
    ]
  })
}

pub fn web_home_properties_response() -> Value {
  json!({
    "links": [],
    "properties": [
      { "name": "category", "value": "Documentation", "type": "String", "attributes": [] },
      { "name": "reviewed", "value": "1", "type": "Boolean", "attributes": [] },
      { "name": "summary", "value": null, "type": "TextArea", "attributes": [] }
    ]
  })
}

pub fn web_home_attachments_response() -> Value {
  json!({
    "links": [],
    "attachments": [
      {
        "id": "xwiki:Main.WebHome@logo.png",
        "name": "logo.png",
        "size": 4,
        "longSize": 4,
        "version": "1.1",
        "mimeType": "image/png",
        "author": "XWiki.Admin",
        "date": 1_700_000_000_000_i64,
        "xwikiRelativeUrl": "/bin/download/Main/WebHome/logo.png",
        "xwikiAbsoluteUrl": LOGO_DOWNLOAD,
        "links": []
      }
    ]
  })
}

pub fn sandbox_response() -> Value {
  json!({
    "id": "xwiki:Main.Sandbox",
    "fullName": "Main.Sandbox",
    "wiki": "xwiki",
    "space": "Main",
    "name": "Sandbox",
    "title": "Sandbox",
    "version": "1.1",
    "links": [
      link("objects", &format!("{SANDBOX}/objects")),
      link("attachments", &format!("{SANDBOX}/attachments"))
    ]
  })
}

pub fn empty_objects_response() -> Value {
  json!({ "links": [], "objectSummaries": [] })
}

pub fn empty_attachments_response() -> Value {
  json!({ "links": [], "attachments": [] })
}

pub fn alice_response() -> Value {
  json!({
    "id": "xwiki:XWiki.alice",
    "fullName": "XWiki.alice",
    "wiki": "xwiki",
    "space": "XWiki",
    "name": "alice",
    "title": "Alice Liddell",
    "links": [link("object", &format!("{ALICE}/objects"))]
  })
}

/// Objects of a user page; the relation names are the bare short form.
pub fn alice_objects_response() -> Value {
  json!({
    "links": [],
    "objectSummaries": [
      {
        "className": "XWiki.XWikiRights",
        "number": 0,
        "links": [{ "rel": "property", "href": format!("{ALICE}/objects/XWiki.XWikiRights/0/properties") }]
      },
      {
        "className": "XWiki.XWikiUsers",
        "number": 0,
        "headline": "XWiki.alice",
        "links": [{ "rel": "property", "href": format!("{ALICE}/objects/XWiki.XWikiUsers/0/properties") }]
      }
    ]
  })
}

pub fn alice_rights_response() -> Value {
  json!({ "properties": [{ "name": "levels", "value": "edit" }] })
}

pub fn alice_profile_response() -> Value {
  json!({
    "properties": [
      { "name": "first_name", "value": "Alice" },
      { "name": "last_name", "value": "Liddell" },
      { "name": "email", "value": "alice@example.org" }
    ]
  })
}

fn search_hit(page_name: &str) -> Value {
  json!({
    "type": "page",
    "id": format!("xwiki:XWiki.{page_name}"),
    "pageFullName": format!("XWiki.{page_name}"),
    "wiki": "xwiki",
    "space": "XWiki",
    "pageName": page_name,
    "score": 1.5,
    "links": []
  })
}

pub fn group_search_response() -> Value {
  json!({
    "links": [],
    "template": "",
    "searchResults": [
      search_hit("XWikiAdminGroup"),
      search_hit("XWikiGroupTemplate"),
      search_hit("XWikiAllGroup")
    ]
  })
}

pub fn admin_group_objects_response() -> Value {
  json!({
    "links": [],
    "objectSummaries": [
      { "className": "XWiki.XWikiGroups", "number": 0, "headline": "XWiki.bob" },
      { "className": "XWiki.XWikiGroups", "number": 1, "headline": "XWiki.alice" },
      { "className": "XWiki.XWikiGroups", "number": 2, "headline": "" },
      { "className": "XWiki.XWikiGroups", "number": 3, "headline": "Guest.carol" }
    ]
  })
}

pub fn current_user_groups_html() -> &'static str {
  r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>CurrentUserGroups (XWiki)</title>
    <script>var skeleton = '<div id="xwikicontent"></div>';</script>
  </head>
  <body id="body" class="viewbody">
    <div id="xwikimaincontainer">
      <input type="hidden" name="form_token" value="abc" disabled>
      <div id="xwikicontent" class="col-xs-12">
        <p>[XWiki.XWikiAdminGroup,<br>XWiki.R&eacute;dacteurs,&nbsp;XWiki.XWikiAllGroup]</p>
      </div>
    </div>
  </body>
</html>"#
}
