//! JustWatch list fetcher.
//!
//! Two requests per run:
//! 1. `GET` the public site to pick up session cookies (status ignored).
//! 2. `POST` the `GetGenericList` GraphQL query for the first page of the list.

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use marquee_core::{CandidateTitle, JustWatchSettings};

use crate::error::{decode_err, Service, SyncError};
use crate::http::read_body;

/// Titles requested per call. No follow-up pages are fetched.
pub const PAGE_SIZE: usize = 100;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("User-Agent", BROWSER_USER_AGENT),
    ("Accept", "*/*"),
    ("Content-Type", "application/json"),
    ("Origin", "https://www.justwatch.com"),
    ("Referer", "https://www.justwatch.com/"),
    ("app-version", "3.10.0-web-web"),
    ("device-id", ""),
    ("sg", ""),
];

const GET_GENERIC_LIST: &str = r#"query GetGenericList($listId: ID!, $country: Country!, $language: Language!, $first: Int!, $filter: TitleFilter!, $sortBy: GenericTitleListSorting! = POPULAR, $sortRandomSeed: Int! = 0, $titleListAfterCursor: String, $profile: PosterProfile, $format: ImageFormat) {
  genericTitleList(
    id: $listId
    country: $country
    after: $titleListAfterCursor
    first: $first
    filter: $filter
    sortBy: $sortBy
    sortRandomSeed: $sortRandomSeed
  ) {
    totalCount
    edges {
      node {
        id
        objectId
        objectType
        content(country: $country, language: $language) {
          title
          fullPath
          scoring {
            imdbScore
            __typename
          }
          posterUrl(profile: $profile, format: $format)
          isReleased
          __typename
        }
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

/// Source of candidate titles.
pub trait WatchlistSource {
    fn fetch_watchlist(&self) -> Result<Vec<CandidateTitle>, SyncError>;
}

/// Blocking JustWatch GraphQL client.
pub struct JustWatchClient {
    agent: ureq::Agent,
    settings: JustWatchSettings,
}

impl JustWatchClient {
    pub fn new(agent: ureq::Agent, settings: JustWatchSettings) -> Self {
        Self { agent, settings }
    }

    fn warm_up(&self) -> Result<(), SyncError> {
        let mut request = self.agent.get(&self.settings.home_url);
        for (name, value) in BROWSER_HEADERS {
            request = request.set(name, value);
        }
        match request.call() {
            Ok(_) | Err(ureq::Error::Status(..)) => Ok(()),
            Err(ureq::Error::Transport(transport)) => Err(SyncError::Transport {
                service: Service::JustWatch,
                source: Box::new(transport),
            }),
        }
    }
}

impl WatchlistSource for JustWatchClient {
    fn fetch_watchlist(&self) -> Result<Vec<CandidateTitle>, SyncError> {
        self.warm_up()?;

        tracing::debug!(url = %self.settings.graphql_url, list = %self.settings.list_id, "fetching watchlist");
        let mut request = self.agent.post(&self.settings.graphql_url);
        for (name, value) in BROWSER_HEADERS {
            request = request.set(name, value);
        }
        let body = read_body(
            Service::JustWatch,
            request.send_json(list_query(&self.settings)),
        )?;
        parse_watchlist(&body)
    }
}

/// GraphQL request body for the first page of `settings.list_id`.
pub fn list_query(settings: &JustWatchSettings) -> Value {
    json!({
        "operationName": "GetGenericList",
        "variables": {
            "sortBy": "NATURAL",
            "sortRandomSeed": 0,
            "listId": settings.list_id,
            "titleListAfterCursor": "",
            "country": settings.country,
            "language": settings.language,
            "first": PAGE_SIZE,
            "filter": {},
        },
        "query": GET_GENERIC_LIST,
    })
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ListData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    generic_title_list: TitleList,
}

#[derive(Debug, Deserialize)]
struct TitleList {
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Node {
    #[serde(deserialize_with = "string_or_number")]
    object_id: String,
    content: Content,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    title: String,
    full_path: String,
    scoring: Scoring,
    poster_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scoring {
    #[serde(default)]
    imdb_score: Option<f64>,
}

/// JustWatch serves `objectId` as a number; older payloads used strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for objectId, got {other}"
        ))),
    }
}

/// Flatten a `GetGenericList` response into candidate titles, in list order.
pub fn parse_watchlist(body: &str) -> Result<Vec<CandidateTitle>, SyncError> {
    let response: GraphqlResponse =
        serde_json::from_str(body).map_err(|e| decode_err(Service::JustWatch, e))?;

    let data = match response.data {
        Some(data) => data,
        None if !response.errors.is_empty() => {
            let message = response
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SyncError::Graphql {
                service: Service::JustWatch,
                message,
            });
        }
        None => {
            return Err(decode_err(
                Service::JustWatch,
                serde::de::Error::missing_field("data"),
            ))
        }
    };

    Ok(data
        .generic_title_list
        .edges
        .into_iter()
        .take(PAGE_SIZE)
        .map(|edge| CandidateTitle {
            title: edge.node.content.title,
            imdb_score: edge.node.content.scoring.imdb_score,
            full_path: edge.node.content.full_path,
            poster_url: edge.node.content.poster_url.unwrap_or_default(),
            object_id: edge.node.object_id,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/watchlist.json");

    fn settings() -> JustWatchSettings {
        JustWatchSettings {
            list_id: "tl-us-0001".into(),
            country: "US".into(),
            language: "en".into(),
            graphql_url: "http://127.0.0.1/graphql".into(),
            home_url: "http://127.0.0.1/".into(),
        }
    }

    #[test]
    fn fixture_edges_map_verbatim() {
        let titles = parse_watchlist(FIXTURE).expect("parse");
        assert_eq!(titles.len(), 3);

        assert_eq!(
            titles[0],
            CandidateTitle {
                title: "Heat".into(),
                imdb_score: Some(8.3),
                full_path: "/us/movie/heat".into(),
                poster_url: "/poster/8714370/{profile}/heat.{format}".into(),
                object_id: "143285".into(),
            }
        );
        assert_eq!(titles[1].title, "Arrival");
        assert_eq!(titles[1].imdb_score, None);
        assert_eq!(titles[2].object_id, "ts-legacy-77");
        assert_eq!(titles[2].poster_url, "");
    }

    #[test]
    fn empty_edge_list_yields_no_titles() {
        let body = r#"{"data":{"genericTitleList":{"totalCount":0,"edges":[]}}}"#;
        assert!(parse_watchlist(body).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = parse_watchlist("<html>blocked</html>").unwrap_err();
        assert!(matches!(err, SyncError::Decode { service: Service::JustWatch, .. }));
    }

    #[test]
    fn missing_content_title_is_decode_error() {
        let body = r#"{"data":{"genericTitleList":{"edges":[
            {"node":{"objectId":1,"content":{"fullPath":"/x","scoring":{},"posterUrl":null}}}
        ]}}}"#;
        let err = parse_watchlist(body).unwrap_err();
        assert!(err.to_string().contains("title"), "got: {err}");
    }

    #[test]
    fn graphql_errors_surface_their_messages() {
        let body = r#"{"data":null,"errors":[{"message":"list not found"},{"message":"bad id"}]}"#;
        let err = parse_watchlist(body).unwrap_err();
        assert!(matches!(err, SyncError::Graphql { .. }));
        assert!(err.to_string().contains("list not found; bad id"));
    }

    #[test]
    fn page_is_capped() {
        let edge = r#"{"node":{"objectId":1,"content":{"title":"T","fullPath":"/t","scoring":{"imdbScore":5.0},"posterUrl":"/p"}}}"#;
        let edges = vec![edge; PAGE_SIZE + 5].join(",");
        let body = format!(r#"{{"data":{{"genericTitleList":{{"edges":[{edges}]}}}}}}"#);
        assert_eq!(parse_watchlist(&body).unwrap().len(), PAGE_SIZE);
    }

    #[test]
    fn list_query_carries_list_and_locale() {
        let query = list_query(&settings());
        let vars = &query["variables"];
        assert_eq!(query["operationName"], "GetGenericList");
        assert_eq!(vars["listId"], "tl-us-0001");
        assert_eq!(vars["country"], "US");
        assert_eq!(vars["language"], "en");
        assert_eq!(vars["first"], 100);
        assert_eq!(vars["filter"], json!({}));
        assert!(query["query"].as_str().unwrap().contains("genericTitleList"));
        // Every variable sent must be declared by the document.
        let document = query["query"].as_str().unwrap();
        for name in vars.as_object().unwrap().keys() {
            assert!(document.contains(&format!("${name}:")), "undeclared ${name}");
        }
    }
}
