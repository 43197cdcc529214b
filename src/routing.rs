use serde::{Deserialize, Serialize};

/// Pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Route {
    /// Map of points of interest per localidad
    #[default]
    Explore,
    /// Visitor questionnaire and recommendations
    Profile,
    /// Crime KPIs
    Crime,
    PageTwo,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Route::Explore,
            "/tu-perfil" => Route::Profile,
            "/delincuencia" => Route::Crime,
            "/page-2" => Route::PageTwo,
            _ => Route::NotFound,
        }
    }
}

/// A sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

impl NavLink {
    pub fn route(&self) -> Route {
        Route::from_path(self.href)
    }
}

pub const SIDEBAR_LINKS: [NavLink; 4] = [
    NavLink {
        label: "Explora localidades",
        href: "/",
    },
    NavLink {
        label: "Tú perfil de turista",
        href: "/tu-perfil",
    },
    NavLink {
        label: "Delitos en Bogotá",
        href: "/delincuencia",
    },
    // the about page is not part of the dashboard, this link lands on the 404 page
    NavLink {
        label: "Sobre nosotros",
        href: "/sobre-nosotros",
    },
];
