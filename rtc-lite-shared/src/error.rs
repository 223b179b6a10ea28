use std::fmt;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    //RTC
    /// ErrConnectionClosed indicates an operation executed after connection
    /// has already been closed.
    #[error("connection closed")]
    ErrConnectionClosed,

    /// ErrCertificateExpired indicates that an x509 certificate has expired.
    #[error("certificate expired")]
    ErrCertificateExpired,

    /// ErrNoTurnCredentials indicates that a TURN server URL was provided
    /// without required credentials.
    #[error("turn server credentials required")]
    ErrNoTurnCredentials,

    /// ErrTurnCredentials indicates that provided TURN credentials are partial
    /// or malformed.
    #[error("invalid turn server credentials")]
    ErrTurnCredentials,

    /// ErrExistingTrack indicates that a track already exists.
    #[error("track already exists")]
    ErrExistingTrack,

    /// ErrModifyingPeerIdentity indicates that an attempt to modify
    /// PeerIdentity was made after PeerConnection has been initialized.
    #[error("peer identity cannot be modified")]
    ErrModifyingPeerIdentity,

    /// ErrModifyingCertificates indicates that an attempt to modify
    /// Certificates was made after PeerConnection has been initialized.
    #[error("certificates cannot be modified")]
    ErrModifyingCertificates,

    /// ErrModifyingBundlePolicy indicates that an attempt to modify
    /// BundlePolicy was made after the first local description.
    #[error("bundle policy cannot be modified")]
    ErrModifyingBundlePolicy,

    /// ErrModifyingRTCPMuxPolicy indicates that an attempt to modify
    /// RTCPMuxPolicy was made after the first local description.
    #[error("rtcp mux policy cannot be modified")]
    ErrModifyingRTCPMuxPolicy,

    /// ErrModifyingICECandidatePoolSize indicates that an attempt to modify
    /// ICECandidatePoolSize was made after the first local description.
    #[error("ice candidate pool size cannot be modified")]
    ErrModifyingICECandidatePoolSize,

    /// ErrCodecNotFound is returned when a codec search to the Media Engine fails
    #[error("codec not found")]
    ErrCodecNotFound,

    /// ErrNoPayloaderForCodec indicates that the codec has no packetization
    /// capability associated with its mime type.
    #[error("the requested codec does not have a payloader")]
    ErrNoPayloaderForCodec,

    /// ErrNoRemoteDescription indicates that an operation was rejected because
    /// the remote description is not set
    #[error("remote description is not set")]
    ErrNoRemoteDescription,

    /// ErrRemoteDescriptionPending indicates that a remote description was
    /// applied while another one is still waiting for an answer.
    #[error("remote description is already pending, it can only be set once per negotiation")]
    ErrRemoteDescriptionPending,

    /// ErrIncorrectSignalingState indicates that the signaling state of PeerConnection is not correct
    #[error("operation can not be run in current signaling state")]
    ErrIncorrectSignalingState,

    #[error("invalid proposed signaling state transition: {0}")]
    ErrSignalingStateProposedTransitionInvalid(String),
    #[error("rollback is not supported")]
    ErrSignalingStateRollbackNotSupported,
    #[error("invalid state change in RTPTransceiver.setSending")]
    ErrRTPTransceiverSetSendingInvalidState,
    #[error("identity provider is not implemented")]
    ErrIdentityProviderNotImplemented,
    #[error("ice restart is not supported")]
    ErrIceRestartNotSupported,
    #[error("remote candidates are not supported by an ice-lite endpoint")]
    ErrRemoteCandidatesNotSupported,
    #[error("host interface enumeration is not supported on this platform")]
    ErrHostInterfacesNotSupported,
    #[error("no async runtime available to run media tasks")]
    ErrNoAsyncRuntime,
    #[error("transport endpoint closed")]
    ErrEndpointClosed,
    #[error("no transport endpoint factory configured")]
    ErrNoEndpointFactory,
    #[error("io: read/write on closed pipe")]
    ErrClosedPipe,
    #[error("media kind and direction must be specified")]
    ErrUnspecifiedMediaKind,

    // ICE server url
    #[error("invalid server address")]
    ErrServerAddr,

    //Third Party Error
    #[error("{0}")]
    RcGen(#[from] rcgen::Error),
    #[error("sdp: {0}")]
    Sdp(String),
    #[error("parse int: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("{0}")]
    Io(#[source] IoError),
    #[error("url parse: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Std(#[source] StdError),
    #[error("mutex poison: {0}")]
    PoisonError(String),

    //Other Errors
    #[error("{0}")]
    Other(String),
}

/// ErrorKind groups every [`Error`] into the condition it reports to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation is illegal in the current signaling or connection state.
    InvalidState,
    /// Credential, certificate or track duplication violation.
    InvalidAccess,
    /// Attempt to change a frozen configuration field.
    InvalidModification,
    /// Feature not implemented by this core.
    NotSupported,
    /// Malformed server URL or session description text.
    Syntax,
    /// Negotiation cannot satisfy the requested constraints.
    Overconstrained,
    /// Catch-all for underlying collaborator failures.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            ErrorKind::InvalidState => "invalid state error",
            ErrorKind::InvalidAccess => "invalid access error",
            ErrorKind::InvalidModification => "invalid modification error",
            ErrorKind::NotSupported => "not supported error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Overconstrained => "overconstrained error",
            ErrorKind::Unknown => "unknown error",
        };
        write!(f, "{s}")
    }
}

impl Error {
    pub fn from_std<T>(error: T) -> Self
    where
        T: std::error::Error + Send + Sync + 'static,
    {
        Error::Std(StdError(Box::new(error)))
    }

    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        if let Error::Std(s) = self {
            return s.0.downcast_ref();
        }

        None
    }

    /// kind classifies the error into the taxonomy exposed to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ErrConnectionClosed
            | Error::ErrNoRemoteDescription
            | Error::ErrRemoteDescriptionPending
            | Error::ErrIncorrectSignalingState
            | Error::ErrSignalingStateProposedTransitionInvalid(_)
            | Error::ErrRTPTransceiverSetSendingInvalidState
            | Error::ErrNoAsyncRuntime
            | Error::ErrEndpointClosed
            | Error::ErrClosedPipe => ErrorKind::InvalidState,

            Error::ErrCertificateExpired
            | Error::ErrNoTurnCredentials
            | Error::ErrTurnCredentials
            | Error::ErrExistingTrack
            | Error::ErrUnspecifiedMediaKind => ErrorKind::InvalidAccess,

            Error::ErrModifyingPeerIdentity
            | Error::ErrModifyingCertificates
            | Error::ErrModifyingBundlePolicy
            | Error::ErrModifyingRTCPMuxPolicy
            | Error::ErrModifyingICECandidatePoolSize => ErrorKind::InvalidModification,

            Error::ErrCodecNotFound
            | Error::ErrNoPayloaderForCodec
            | Error::ErrSignalingStateRollbackNotSupported
            | Error::ErrIdentityProviderNotImplemented
            | Error::ErrIceRestartNotSupported
            | Error::ErrRemoteCandidatesNotSupported
            | Error::ErrHostInterfacesNotSupported
            | Error::ErrNoEndpointFactory => ErrorKind::NotSupported,

            Error::ErrServerAddr
            | Error::Sdp(_)
            | Error::ParseInt(_)
            | Error::Url(_) => ErrorKind::Syntax,

            _ => ErrorKind::Unknown,
        }
    }
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}

/// An escape hatch to preserve stack traces when we don't know the error.
///
/// Collaborators such as transport endpoints surface their own error types;
/// `Error::from_std` keeps the underlying error as the source.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StdError(pub Box<dyn std::error::Error + Send + Sync>);

impl PartialEq for StdError {
    fn eq(&self, _: &Self) -> bool {
        false
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        Error::PoisonError(e.to_string())
    }
}

impl From<sdp::Error> for Error {
    fn from(e: sdp::Error) -> Self {
        Error::Sdp(e.to_string())
    }
}
