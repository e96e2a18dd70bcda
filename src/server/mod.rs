// src/server/mod.rs

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use tracing::{debug, info, warn};
use warp::{http::StatusCode, reject::Rejection, reply::Reply, Filter};

use crate::view::{Dashboard, ModalToggle};

const SERVICE: &str = "soil-food-dashboard";

#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub country: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ModalResponse {
    pub is_open: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

fn with_dashboard(
    dash: Arc<Dashboard>,
) -> impl Filter<Extract = (Arc<Dashboard>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&dash))
}

async fn index(dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::html(dash.page().to_string()))
}

async fn health_check(dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": SERVICE,
        "soil_rows": dash.soil().len(),
        "trade_rows": dash.trade().len(),
        "loaded_at": dash.loaded_at(),
    })))
}

async fn countries(dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&dash.countries()))
}

async fn map(query: MapQuery, dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    let fig = dash.map(query.country.as_deref());
    debug!(
        country = query.country.as_deref().unwrap_or(""),
        markers = fig.data[0].marker().size.len(),
        "map requested"
    );
    Ok(warp::reply::json(&fig))
}

async fn density(dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(dash.density_figure()))
}

async fn risk(dash: Arc<Dashboard>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(dash.risk_figure()))
}

async fn modal(state: ModalToggle) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&ModalResponse {
        is_open: state.next(),
    }))
}

/// Turn rejections into JSON bodies instead of warp's plain-text defaults.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, error, details) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found", None)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            "Invalid request body",
            Some(e.to_string()),
        )
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, "Invalid query", Some(e.to_string()))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large", None)
    } else {
        warn!("unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error", None)
    };

    let body = warp::reply::json(&ErrorResponse {
        error: error.to_string(),
        details,
    });
    Ok(warp::reply::with_status(body, status))
}

/// All routes of the dashboard.
pub fn routes(
    dash: Arc<Dashboard>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_dashboard(dash.clone()))
        .and_then(index);

    let health = warp::path!("health")
        .and(warp::get())
        .and(with_dashboard(dash.clone()))
        .and_then(health_check);

    let countries = warp::path!("api" / "countries")
        .and(warp::get())
        .and(with_dashboard(dash.clone()))
        .and_then(countries);

    let map = warp::path!("api" / "map")
        .and(warp::get())
        .and(warp::query::<MapQuery>())
        .and(with_dashboard(dash.clone()))
        .and_then(map);

    let density = warp::path!("api" / "figures" / "density")
        .and(warp::get())
        .and(with_dashboard(dash.clone()))
        .and_then(density);

    let risk = warp::path!("api" / "figures" / "risk")
        .and(warp::get())
        .and(with_dashboard(dash))
        .and_then(risk);

    let modal = warp::path!("api" / "modal")
        .and(warp::post())
        .and(warp::body::content_length_limit(1024))
        .and(warp::body::json::<ModalToggle>())
        .and_then(modal);

    index
        .or(health)
        .or(countries)
        .or(map)
        .or(density)
        .or(risk)
        .or(modal)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

pub async fn serve(dash: Arc<Dashboard>, addr: SocketAddr) {
    info!("Server starting on {}", addr);
    info!("Dashboard: http://localhost:{}/", addr.port());
    info!("Health check: http://localhost:{}/health", addr.port());
    warp::serve(routes(dash)).run(addr).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Continent, SoilSample, TradeRecord};
    use crate::figure::MapStyle;
    use serde_json::Value;

    fn dashboard() -> Arc<Dashboard> {
        let soil = vec![
            ("Kenya", 36.8, -1.3, 12.0),
            ("Kenya", 37.1, 0.2, 8.0),
            ("Brazil", -47.9, -15.8, 20.0),
        ]
        .into_iter()
        .map(|(name, lon, lat, socd)| SoilSample {
            reporter_country_name: name.into(),
            reporter_country_continent: if name == "Kenya" {
                Continent::Africa
            } else {
                Continent::SouthAmerica
            },
            lon,
            lat,
            socd_depth4_5: socd,
            population_estimate: 1_000,
        })
        .collect();
        let trade = vec![TradeRecord {
            partner_country_name: "China".into(),
            item: "Tea".into(),
            export_quantity_tonnes: 12.5,
        }];
        Arc::new(Dashboard::build(soil, trade, MapStyle::default()))
    }

    fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).expect("json body")
    }

    #[tokio::test]
    async fn test_health_check() {
        let res = warp::test::request()
            .path("/health")
            .reply(&routes(dashboard()))
            .await;
        assert_eq!(res.status(), 200);
        let v = json_body(res.body());
        assert_eq!(v["status"], "healthy");
        assert_eq!(v["soil_rows"], 3);
        assert_eq!(v["trade_rows"], 1);
    }

    #[tokio::test]
    async fn index_serves_page() {
        let res = warp::test::request().path("/").reply(&routes(dashboard())).await;
        assert_eq!(res.status(), 200);
        let html = String::from_utf8_lossy(res.body());
        assert!(html.contains("value=\"Brazil\""));
    }

    #[tokio::test]
    async fn countries_are_sorted() {
        let res = warp::test::request()
            .path("/api/countries")
            .reply(&routes(dashboard()))
            .await;
        assert_eq!(json_body(res.body()), serde_json::json!(["Brazil", "Kenya"]));
    }

    #[tokio::test]
    async fn map_filters_by_country() {
        let routes = routes(dashboard());

        let res = warp::test::request()
            .path("/api/map?country=Kenya")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), 200);
        let v = json_body(res.body());
        assert_eq!(v["data"][0]["marker"]["size"], serde_json::json!([12.0, 8.0]));

        for path in [
            "/api/map?country=France",
            "/api/map?country=",
            "/api/map?country=%20Kenya",
            "/api/map",
        ] {
            let res = warp::test::request().path(path).reply(&routes).await;
            assert_eq!(res.status(), 200, "{}", path);
            let v = json_body(res.body());
            assert_eq!(v["data"][0]["lon"], serde_json::json!([]), "{}", path);
        }
    }

    #[tokio::test]
    async fn map_decodes_spaces_in_names() {
        let res = warp::test::request()
            .path("/api/map?country=South%20Sudan")
            .reply(&routes(dashboard()))
            .await;
        assert_eq!(res.status(), 200);
    }

    #[tokio::test]
    async fn static_figures_are_served() {
        let routes = routes(dashboard());
        let res = warp::test::request()
            .path("/api/figures/density")
            .reply(&routes)
            .await;
        assert_eq!(json_body(res.body())["data"][0]["type"], "bar");

        let res = warp::test::request()
            .path("/api/figures/risk")
            .reply(&routes)
            .await;
        let v = json_body(res.body());
        assert_eq!(v["data"][0]["type"], "scatter");
        assert_eq!(v["data"][0]["customdata"][0][1], "12");
    }

    #[tokio::test]
    async fn modal_flips_on_any_click() {
        let routes = routes(dashboard());

        let res = warp::test::request()
            .method("POST")
            .path("/api/modal")
            .json(&ModalToggle {
                open_clicks: 1,
                close_clicks: 0,
                is_open: false,
            })
            .reply(&routes)
            .await;
        assert_eq!(
            serde_json::from_slice::<ModalResponse>(res.body()).unwrap(),
            ModalResponse { is_open: true }
        );

        let res = warp::test::request()
            .method("POST")
            .path("/api/modal")
            .json(&ModalToggle {
                open_clicks: 1,
                close_clicks: 1,
                is_open: true,
            })
            .reply(&routes)
            .await;
        assert_eq!(
            serde_json::from_slice::<ModalResponse>(res.body()).unwrap(),
            ModalResponse { is_open: false }
        );
    }

    #[tokio::test]
    async fn malformed_modal_body_is_bad_request() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/modal")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&routes(dashboard()))
            .await;
        assert_eq!(res.status(), 400);
        assert_eq!(json_body(res.body())["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let res = warp::test::request()
            .path("/nope")
            .reply(&routes(dashboard()))
            .await;
        assert_eq!(res.status(), 404);
        assert_eq!(json_body(res.body())["error"], "Not found");
    }
}
