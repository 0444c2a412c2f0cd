pub mod tokens;
pub use tokens::{Claims, TokenKind, TokenPair, TokenSigner};

pub mod revocation;
pub use revocation::{MemoryRevocationStore, RedisRevocationStore, RevocationStore};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::JwtAuthService;

pub mod lot_service;
pub mod lot_service_impl;
pub use lot_service::{LotError, ParkingLotService};
pub use lot_service_impl::SeaOrmParkingLotService;
