//! Category management feature: single-row CRUD over categories plus the
//! per-news category lookup. The unique-name invariant lives in the service.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories |
//! | GET | `/api/categories/{id}` | No | Get category |
//! | GET | `/api/news/{id}/categories` | No | Categories of one news item |
//! | POST | `/api/categories` | API key | Create category |
//! | PUT | `/api/categories/{id}` | API key | Update category |
//! | DELETE | `/api/categories/{id}` | API key | Delete category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CategoryService;
pub use stores::PgCategoryStore;
