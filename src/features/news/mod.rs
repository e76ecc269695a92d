//! News catalogue feature: paginated listing with aggregated category ids
//! and transactional partial edits with whole-set category replacement.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/news` | No | List news with categories |
//! | PATCH | `/api/news/{id}` | API key | Patch fields, replace categories |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::NewsService;
pub use stores::PgNewsStore;
