pub mod user_repo;
pub use user_repo::UserRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod facility_repo;
pub use facility_repo::FacilityRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod tournament_repo;
pub use tournament_repo::TournamentRepository;
pub mod invitation_repo;
pub use invitation_repo::InvitationRepository;
