//! Askama templates for the web frontend.

use askama::Template;

use crate::format::RouteStop;

/// Route page.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub origin: String,
    pub destination: String,
    pub cost: String,
    pub transfers: usize,
    pub stops: Vec<StopView>,
}

impl RouteTemplate {
    /// Create from resolved stops. `stops` must be non-empty.
    pub fn new(stops: &[RouteStop], cost: f64) -> Self {
        let views = StopView::from_stops(stops);
        Self {
            origin: stops.first().map(|s| s.name.clone()).unwrap_or_default(),
            destination: stops.last().map(|s| s.name.clone()).unwrap_or_default(),
            cost: format!("{cost:.4}"),
            transfers: views.iter().filter(|v| v.is_transfer).count(),
            stops: views,
        }
    }
}

/// Stop view model for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopView {
    pub name: String,

    /// Line name, or empty when unknown
    pub line_label: String,

    /// The previous stop has the same name: this hop is a change of line.
    pub is_transfer: bool,
}

impl StopView {
    /// Build views for a whole route, marking changes of line.
    pub fn from_stops(stops: &[RouteStop]) -> Vec<Self> {
        let mut previous: Option<&str> = None;
        stops
            .iter()
            .map(|stop| {
                let is_transfer = previous == Some(stop.name.as_str());
                previous = Some(stop.name.as_str());
                Self {
                    name: stop.name.clone(),
                    line_label: stop.line_name.clone().unwrap_or_default(),
                    is_transfer,
                }
            })
            .collect()
    }
}
