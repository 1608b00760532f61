use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP verb used by an [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Every endpoint the client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Recommend,
    ShelfLife,
    GlobalWaste,
    GlobalWasteSteps,
    StoreSpoiled,
    DeleteStoreSpoiled,
    ModelInfo,
    Weather,
    Health,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Recommend,
        Operation::ShelfLife,
        Operation::GlobalWaste,
        Operation::GlobalWasteSteps,
        Operation::StoreSpoiled,
        Operation::DeleteStoreSpoiled,
        Operation::ModelInfo,
        Operation::Weather,
        Operation::Health,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Operation::Recommend => "/inventory",
            Operation::ShelfLife => "/shelf_life",
            Operation::GlobalWaste => "/global_waste",
            Operation::GlobalWasteSteps => "/global_waste_steps",
            Operation::StoreSpoiled | Operation::DeleteStoreSpoiled => "/store_spoiled",
            Operation::ModelInfo => "/model_info",
            Operation::Weather => "/weather",
            Operation::Health => "/",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::Recommend => Method::Post,
            Operation::DeleteStoreSpoiled => Method::Delete,
            _ => Method::Get,
        }
    }

    /// Find the operation served at `method` + `path`
    pub fn route(method: &str, path: &str) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|op| op.method().as_str().eq_ignore_ascii_case(method) && op.path() == path)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Recommend => "recommend",
            Operation::ShelfLife => "shelf_life",
            Operation::GlobalWaste => "global_waste",
            Operation::GlobalWasteSteps => "global_waste_steps",
            Operation::StoreSpoiled => "store_spoiled",
            Operation::DeleteStoreSpoiled => "delete_store_spoiled",
            Operation::ModelInfo => "model_info",
            Operation::Weather => "weather",
            Operation::Health => "health",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_resolves_every_operation() {
        for op in Operation::ALL {
            assert_eq!(Operation::route(op.method().as_str(), op.path()), Some(op));
        }
    }

    #[test]
    fn test_store_spoiled_shares_path_by_method() {
        assert_eq!(Operation::route("get", "/store_spoiled"), Some(Operation::StoreSpoiled));
        assert_eq!(
            Operation::route("DELETE", "/store_spoiled"),
            Some(Operation::DeleteStoreSpoiled)
        );
        assert_eq!(Operation::route("PUT", "/store_spoiled"), None);
    }
}
