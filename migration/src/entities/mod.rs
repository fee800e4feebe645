pub mod challenge;
pub mod solve;
pub mod team;
pub mod user;

pub use challenge::Entity as ChallengeEntity;
pub use solve::Entity as SolveEntity;
pub use team::Entity as TeamEntity;
pub use user::Entity as UserEntity;
