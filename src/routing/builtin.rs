//! Built-in route tables for the asset management front-end.
//!
//! Both known table variants are derived from a single canonical list. Each
//! row records whether it belongs to the basic variant; the full variant
//! contains every row.

use serde::{Deserialize, Serialize};

use crate::routing::table::{RouteTable, RouteTableBuilder, TableError};

/// Which built-in table to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    /// Every known route, including asset creation, portfolio and calculators.
    #[default]
    Full,
    /// Auth, admin listing and asset browsing only.
    Basic,
}

/// One row of the canonical table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub view: &'static str,
    pub basic: bool,
}

const fn def(path: &'static str, name: &'static str, view: &'static str, basic: bool) -> RouteDef {
    RouteDef {
        path,
        name,
        view,
        basic,
    }
}

/// Canonical route list, in evaluation order.
pub const ROUTES: &[RouteDef] = &[
    def("/", "home", "HomeView", true),
    def("/login", "login", "auth/LoginView", true),
    def("/signup", "signup", "auth/SignUpView", true),
    def("/admin/users", "AdminUsers", "admin/UserManagement", true),
    def("/admin/assets", "AdminAssets", "admin/AssetManagement", true),
    def("/admin/assets/add", "AddAsset", "admin/AddAsset", false),
    def("/assets", "AvailableAssets", "user/AvailableAssets", true),
    def("/portfolio", "Portfolio", "user/Portfolio", false),
    def("/assets/:ticker", "SpecificAsset", "user/SpecificAsset", true),
    def(
        "/calculator/compound_interest",
        "CalculadoraInteresCompuesto",
        "CalculadoraInteresCompuesto",
        false,
    ),
    def("/calculator/mortgage", "CalculadoraHipotecas", "CalculadoraHipotecas", false),
    def("/*", "NotFound", "NotFound", true),
];

impl TableVariant {
    /// Rows of the canonical list that belong to this variant.
    pub fn defs(self) -> impl Iterator<Item = &'static RouteDef> {
        ROUTES
            .iter()
            .filter(move |d| matches!(self, TableVariant::Full) || d.basic)
    }

    /// A builder preloaded with this variant's routes.
    pub fn builder(self) -> RouteTableBuilder<String> {
        self.defs().fold(RouteTable::builder(), |b, d| {
            b.route(d.path, d.name, d.view.to_string())
        })
    }

    pub fn table(self) -> Result<RouteTable<String>, TableError> {
        self.builder().build()
    }
}
