//! Mock E-utilities server shared by the integration tests

#![allow(dead_code)]

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;

pub const ARTICLE_111: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">111</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate><Year>2024</Year><Month>Feb</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Industry partnerships in oncology trials.</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Muller</LastName>
            <ForeName>Eva</ForeName>
            <AffiliationInfo><Affiliation>Novartis Pharma AG, Basel, Switzerland.</Affiliation></AffiliationInfo>
          </Author>
          <Author>
            <LastName>Park</LastName>
            <ForeName>Jin</ForeName>
            <AffiliationInfo><Affiliation>Dept. of Medicine, Johns Hopkins University, jpark@jhu.edu.</Affiliation></AffiliationInfo>
          </Author>
          <Author>
            <LastName>Doe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo><Affiliation>Contact: jane.doe@biotech-corp.com; Biotech Corp</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

pub const ARTICLE_222: &str = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
  <Article><AuthorList><Author><LastName>Solo</LastName></Author></AuthorList></Article>
</MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

async fn esearch(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let well_formed = params.get("db").map(String::as_str) == Some("pubmed")
        && params.get("retmode").map(String::as_str) == Some("json");
    if !well_formed {
        return (StatusCode::BAD_REQUEST, "bad parameters".to_string());
    }

    let term = params.get("term").cloned().unwrap_or_default();
    let body = match term.as_str() {
        "nothing matches" => r#"{"esearchresult":{"count":"0","idlist":[]}}"#.to_string(),
        "broken json" => r#"{"esearchresult":"#.to_string(),
        "server error" => return (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        _ => {
            let retmax: usize = params
                .get("retmax")
                .and_then(|r| r.parse().ok())
                .unwrap_or(20);
            let ids: Vec<&str> = ["111", "999", "222", "333"]
                .into_iter()
                .take(retmax)
                .collect();
            serde_json::json!({ "esearchresult": { "idlist": ids } }).to_string()
        }
    };
    (StatusCode::OK, body)
}

async fn efetch(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let id = params.get("id").cloned().unwrap_or_default();
    let (status, body) = match id.as_str() {
        "111" => (StatusCode::OK, ARTICLE_111),
        "222" => (StatusCode::OK, ARTICLE_222),
        "333" => (StatusCode::OK, "<PubmedArticleSet><PubmedArticle>"),
        "444" => (
            StatusCode::OK,
            "<PubmedArticleSet></PubmedArticleSet><PubmedArticleSet/>",
        ),
        _ => (StatusCode::NOT_FOUND, "unknown id"),
    };
    (status, [(header::CONTENT_TYPE, "text/xml")], body)
}

/// Start the mock server and return its base URL
pub async fn spawn_mock_eutils() -> String {
    let app = Router::new()
        .route("/eutils/esearch.fcgi", get(esearch))
        .route("/eutils/efetch.fcgi", get(efetch));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/eutils/", addr)
}

/// Base URL of a port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}/eutils/", addr)
}
