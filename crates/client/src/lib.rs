//! Typed HTTP client for the Faranga loan-platform API.
//!
//! [`ApiGateway`] is the single choke point for every network call:
//! base-URL resolution, header merging, JSON and multipart bodies,
//! content-type-driven success payloads, and uniform error reporting
//! (status code plus best-effort parsed body). The per-audience clients
//! ([`AuthClient`], [`FarmerClient`], [`MfiClient`], [`AdminClient`])
//! are thin typed wrappers over it; [`ScoringProvider`] is the async
//! seam for the three ML preview models.

mod activity;
mod admin;
mod auth;
mod chat;
mod error;
mod farmer;
mod gateway;
mod mfi;
mod ml;
mod multipart;

pub use activity::{log_event, EventType};
pub use admin::{
    ActivityEvent, ActivityResponse, AdminClient, AdminStats, AdminUser, ApplicationCounts,
    UserCounts, UsersResponse,
};
pub use auth::{AuthClient, MessageResponse, RegisterRequest};
pub use chat::{chat, ChatReply};
pub use error::{ApiError, ErrorBody};
pub use farmer::{
    ApplicationDocument, ApplicationsResponse, DocumentsResponse, FarmerClient, FarmerProfile,
    Loan, LoanApplication, LoanApplicationForm, LoansResponse, ProfileUpdate, Repayment,
    RepaymentsResponse, RequiredDocument, RequiredDocumentsResponse, SubmittedApplication,
};
pub use gateway::{
    ApiGateway, Body, Download, Method, Payload, API_URL_ENV, BACKEND_ORIGIN_ENV, DEV_API_BASE,
    LIVE_API_BASE,
};
pub use mfi::{
    MfiApplication, MfiApplicationsResponse, MfiClient, PortfolioSummary, RepaymentCounts,
    ReviewAction, ReviewOutcome, ReviewTerms, StatusUpdateRequest, UpdatedStatus,
};
pub use ml::{HttpScoring, ScoringProvider};
pub use multipart::MultipartForm;
