// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    text_or, AdoptionApplication, ApplicantContact, ApplicationStatus, FeedLimits, FosterInterest,
    MatchResult, PetRecord, PetSummary, RankedPet, ScoredPet, UrgencyResult, UrgencyWeights,
    UserPreference, WhyUrgent, YardAccess,
};
pub use requests::{ApplyRequest, FeedQuery, FosterInterestRequest, MatchQuery, UpdateStatusRequest};
pub use responses::{
    AckResponse, ApplicationListResponse, ApplicationResponse, ApplyResponse, ErrorResponse,
    FeedResponse, HealthResponse, MatchResponse, PetResponse,
};
