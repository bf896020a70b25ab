//! The DICOM upper layer association state machine.
//!
//! This module implements the state table of PS3.8 section 9.2 as a pure
//! transition function: `process(state, event) -> (state, actions)`. It owns
//! no timer, no socket and no buffer. The caller is expected to:
//!
//! - serialize calls to [`AssociationStateMachine::process`] (the machine is
//!   single-threaded cooperative and suspends nowhere),
//! - react to the returned [`Action`]s by starting/stopping the ARTIM timer,
//!   opening/closing the transport and notifying the local user,
//! - feed PDUs received off the wire back in as [`Event`]s.
//!
//! This is deliberately decoupled from [`crate::association::client`] and
//! [`crate::association::server`], which already perform association
//! establishment end-to-end over a blocking [`std::net::TcpStream`]. The
//! state machine here is for callers that need the state table itself
//! (for a custom transport, an async runtime, or for testing protocol
//! conformance) without committing to a particular I/O model.

use crate::pdu::{AbortRQSource, AssociationAC, AssociationRJ, AssociationRQ, Pdu};

/// One of the 13 states of the upper layer state machine (PS3.8 Table 9-10).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// Sta1: idle.
    Sta1,
    /// Sta2: transport connection open, awaiting A-ASSOCIATE-RQ PDU.
    Sta2,
    /// Sta3: awaiting local A-ASSOCIATE response primitive.
    Sta3,
    /// Sta4: awaiting transport connection opening to complete.
    Sta4,
    /// Sta5: awaiting A-ASSOCIATE-AC or -RJ PDU.
    Sta5,
    /// Sta6: association established, ready for data transfer.
    Sta6,
    /// Sta7: awaiting A-RELEASE-RP PDU.
    Sta7,
    /// Sta8: awaiting local A-RELEASE response primitive.
    Sta8,
    /// Sta9: release collision requestor, awaiting local A-RELEASE response.
    Sta9,
    /// Sta10: release collision acceptor, awaiting A-RELEASE-RP PDU.
    Sta10,
    /// Sta11: release collision requestor, awaiting A-RELEASE-RP PDU.
    Sta11,
    /// Sta12: release collision acceptor, awaiting local A-RELEASE response.
    Sta12,
    /// Sta13: awaiting transport connection close.
    Sta13,
}

/// Events that may be fed into the state machine.
///
/// Partitioned, per the specification, into user primitives, transport
/// events, received PDUs and timer expiry.
#[derive(Debug, Clone)]
pub enum Event {
    // -- user primitives --
    /// A-ASSOCIATE request issued by the local user (SCU side).
    AAssociateRequest(Box<AssociationRQ>),
    /// A-ASSOCIATE response issued by the local user (SCP side), positive or negative.
    AAssociateResponse(AssociateResponse),
    /// A-RELEASE request issued by the local user.
    AReleaseRequest,
    /// A-RELEASE response issued by the local user.
    AReleaseResponse,
    /// A-ABORT request issued by the local user.
    AAbortRequest,
    /// P-DATA request issued by the local user.
    PDataRequest,

    // -- transport events --
    /// The transport connection has been confirmed open (SCU side).
    TransportConnectConfirm,
    /// A transport connection indication has arrived (SCP side).
    TransportConnectIndication,
    /// The transport connection has closed.
    TransportClosed,

    // -- PDUs received from the peer --
    /// An A-ASSOCIATE-RQ PDU was received.
    PduAssociateRq(Box<AssociationRQ>),
    /// An A-ASSOCIATE-AC PDU was received.
    PduAssociateAc(Box<AssociationAC>),
    /// An A-ASSOCIATE-RJ PDU was received.
    PduAssociateRj(AssociationRJ),
    /// A P-DATA-TF PDU was received.
    PduPData,
    /// An A-RELEASE-RQ PDU was received.
    PduReleaseRq,
    /// An A-RELEASE-RP PDU was received.
    PduReleaseRp,
    /// An A-ABORT PDU was received.
    PduAbort(AbortRQSource),
    /// A PDU could not be decoded or was of an unexpected type for the
    /// current state.
    PduInvalid,

    // -- timer --
    /// The ARTIM timer has expired.
    ArtimTimerExpired,
}

/// The local user's response to a received A-ASSOCIATE-RQ (Sta3 exit).
#[derive(Debug, Clone)]
pub enum AssociateResponse {
    /// Positive response: accept the association.
    Accept(Box<AssociationAC>),
    /// Negative response: reject the association.
    Reject(AssociationRJ),
}

/// A side effect requested by the state machine as the result of processing
/// an event. The machine itself never performs I/O or starts timers; it only
/// describes what the host should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the ARTIM timer.
    StartArtim,
    /// Stop the ARTIM timer.
    StopArtim,
    /// Open a transport connection to the peer, on behalf of the given
    /// pending A-ASSOCIATE-RQ (to be sent once the connection is confirmed).
    OpenTransport(Box<AssociationRQ>),
    /// Close the transport connection.
    CloseTransport,
    /// Send the given PDU to the peer.
    SendPdu(Pdu),
    /// Notify the local user that the association was accepted.
    NotifyAccepted,
    /// Notify the local user that the association was rejected.
    NotifyRejected,
    /// Notify the local user that the association was aborted, with a
    /// human-readable reason.
    NotifyAborted(String),
    /// Notify the local user that the peer released the association.
    NotifyReleased,
}

/// A fatal protocol violation: the event is not valid in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolViolation {
    pub state: State,
}

impl std::fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event is not valid in state {:?}", self.state)
    }
}

impl std::error::Error for ProtocolViolation {}

/// Negotiated parameters, available once the machine reaches [`State::Sta6`].
#[derive(Debug, Clone, Default)]
pub struct NegotiatedParameters {
    pub called_ae: Option<String>,
    pub calling_ae: Option<String>,
    pub accepted_presentation_contexts: Vec<crate::pdu::PresentationContextResult>,
    pub negotiated_max_pdu: Option<u32>,
}

/// The association upper layer state machine, expressed as a pure transition
/// function over [`State`] plus whatever ancillary data is needed to report
/// negotiated parameters once established.
///
/// `local_max_pdu` is supplied by the host and used, together with the
/// peer's proposed maximum length, to compute [`NegotiatedParameters::negotiated_max_pdu`].
#[derive(Debug, Clone)]
pub struct AssociationStateMachine {
    state: State,
    local_max_pdu: u32,
    negotiated: NegotiatedParameters,
    /// The A-ASSOCIATE-RQ awaiting transport confirmation (Sta4), to be sent
    /// once the transport connection is up.
    pending_rq: Option<Box<AssociationRQ>>,
}

impl AssociationStateMachine {
    /// Create a new state machine in Sta1 (idle).
    pub fn new(local_max_pdu: u32) -> Self {
        AssociationStateMachine {
            state: State::Sta1,
            local_max_pdu,
            negotiated: NegotiatedParameters::default(),
            pending_rq: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The negotiated parameters, populated once [`State::Sta6`] is reached.
    pub fn negotiated(&self) -> &NegotiatedParameters {
        &self.negotiated
    }

    /// Process one event, returning the actions the host must perform.
    ///
    /// Any `(state, event)` pair not covered by the PS3.8 table is a fatal
    /// protocol violation: the machine transitions to [`State::Sta1`] and the
    /// caller receives a single `CloseTransport` + `NotifyAborted` action
    /// pair alongside the error.
    pub fn process(&mut self, event: Event) -> Result<Vec<Action>, ProtocolViolation> {
        use Action::*;
        use State::*;

        // events valid from (almost) any state
        if let Event::TransportClosed = event {
            if self.state != Sta1 {
                self.state = Sta1;
                return Ok(vec![StopArtim]);
            }
        }
        if let Event::PduAbort(source) = &event {
            if self.state != Sta1 {
                self.state = Sta1;
                return Ok(vec![
                    StopArtim,
                    CloseTransport,
                    NotifyAborted(format!("association aborted by peer: {:?}", source)),
                ]);
            }
        }
        if let Event::AAbortRequest = event {
            if self.state != Sta1 {
                self.state = Sta1;
                return Ok(vec![SendPdu(Pdu::AbortRQ {
                    source: AbortRQSource::ServiceUser,
                }), StopArtim, CloseTransport]);
            }
        }

        let (next, actions) = match (self.state, event) {
            (Sta1, Event::AAssociateRequest(rq)) => {
                self.pending_rq = Some(rq.clone());
                (Sta4, vec![OpenTransport(rq)])
            }
            (Sta1, Event::TransportConnectIndication) => (Sta2, vec![StartArtim]),

            (Sta2, Event::PduAssociateRq(rq)) => {
                self.negotiated.calling_ae = Some(rq.calling_ae_title.clone());
                self.negotiated.called_ae = Some(rq.called_ae_title.clone());
                (Sta3, vec![StopArtim])
            }
            (Sta2, Event::ArtimTimerExpired) => (Sta1, vec![CloseTransport]),

            (Sta3, Event::AAssociateResponse(AssociateResponse::Accept(ac))) => {
                self.negotiate_max_pdu(&ac);
                self.negotiated.accepted_presentation_contexts =
                    ac.presentation_contexts.clone();
                (
                    Sta6,
                    vec![SendPdu(Pdu::AssociationAC(*ac)), NotifyAccepted],
                )
            }
            (Sta3, Event::AAssociateResponse(AssociateResponse::Reject(rj))) => {
                (Sta1, vec![SendPdu(Pdu::AssociationRJ(rj)), CloseTransport])
            }

            (Sta4, Event::TransportConnectConfirm) => {
                let rq = self
                    .pending_rq
                    .take()
                    .expect("Sta4 is only reached via AAssociateRequest, which sets pending_rq");
                (Sta5, vec![SendPdu(Pdu::AssociationRQ(*rq))])
            }

            (Sta5, Event::PduAssociateAc(ac)) => {
                self.negotiate_max_pdu(&ac);
                self.negotiated.called_ae = Some(ac.called_ae_title.clone());
                self.negotiated.calling_ae = Some(ac.calling_ae_title.clone());
                self.negotiated.accepted_presentation_contexts =
                    ac.presentation_contexts.clone();
                (Sta6, vec![NotifyAccepted])
            }
            (Sta5, Event::PduAssociateRj(_rj)) => (Sta1, vec![CloseTransport, NotifyRejected]),

            (Sta6, Event::AReleaseRequest) => (Sta7, vec![SendPdu(Pdu::ReleaseRQ)]),
            (Sta6, Event::PduReleaseRq) => (Sta8, vec![]),
            (Sta6, Event::PDataRequest) => (Sta6, vec![]),
            (Sta6, Event::PduPData) => (Sta6, vec![]),

            (Sta7, Event::PduReleaseRp) => (Sta1, vec![CloseTransport, NotifyReleased]),
            // release collision: the peer also requested release
            (Sta7, Event::PduReleaseRq) => (Sta9, vec![]),

            (Sta8, Event::AReleaseResponse) => (Sta1, vec![SendPdu(Pdu::ReleaseRP), CloseTransport]),
            // release collision: the local user also requested release
            (Sta8, Event::AReleaseRequest) => (Sta10, vec![]),

            (Sta9, Event::AReleaseResponse) => (Sta11, vec![SendPdu(Pdu::ReleaseRP)]),

            (Sta10, Event::PduReleaseRp) => (Sta12, vec![]),

            (Sta11, Event::PduReleaseRp) => (Sta13, vec![StartArtim]),

            (Sta12, Event::AReleaseResponse) => (Sta13, vec![SendPdu(Pdu::ReleaseRP), StartArtim]),

            (Sta13, Event::TransportClosed) => (Sta1, vec![StopArtim]),
            (Sta13, Event::ArtimTimerExpired) => (Sta1, vec![CloseTransport]),

            (state, _other) => return Err(ProtocolViolation { state }),
        };

        self.state = next;
        Ok(actions)
    }

    fn negotiate_max_pdu(&mut self, ac: &AssociationAC) {
        let peer_max_pdu = ac
            .user_variables
            .iter()
            .find_map(|v| match v {
                crate::pdu::UserVariableItem::MaxLength(len) => Some(*len),
                _ => None,
            })
            .unwrap_or(u32::MAX);
        let negotiated = match (self.local_max_pdu, peer_max_pdu) {
            (0, other) | (other, 0) => other,
            (a, b) => a.min(b),
        };
        self.negotiated.negotiated_max_pdu = Some(negotiated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::PresentationContextResult;

    fn sample_rq() -> Box<AssociationRQ> {
        Box::new(AssociationRQ {
            protocol_version: 1,
            calling_ae_title: "SCU".to_string(),
            called_ae_title: "SCP".to_string(),
            application_context_name: "1.2.840.10008.3.1.1.1".to_string(),
            presentation_contexts: vec![],
            user_variables: vec![],
        })
    }

    fn sample_ac() -> Box<AssociationAC> {
        Box::new(AssociationAC {
            protocol_version: 1,
            application_context_name: "1.2.840.10008.3.1.1.1".to_string(),
            called_ae_title: "SCP".to_string(),
            calling_ae_title: "SCU".to_string(),
            presentation_contexts: vec![],
            user_variables: vec![],
        })
    }

    #[test]
    fn happy_path_sta1_to_sta6() {
        let mut sm = AssociationStateMachine::new(16384);
        assert_eq!(sm.state(), State::Sta1);

        let actions = sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        assert_eq!(sm.state(), State::Sta4);
        assert_eq!(actions, vec![Action::OpenTransport(sample_rq())]);

        let actions = sm.process(Event::TransportConnectConfirm).unwrap();
        assert_eq!(sm.state(), State::Sta5);
        assert_eq!(
            actions,
            vec![Action::SendPdu(Pdu::AssociationRQ(*sample_rq()))]
        );

        let actions = sm.process(Event::PduAssociateAc(sample_ac())).unwrap();
        assert_eq!(sm.state(), State::Sta6);
        assert_eq!(actions, vec![Action::NotifyAccepted]);
    }

    #[test]
    fn release_collision_path() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        sm.process(Event::TransportConnectConfirm).unwrap();
        sm.process(Event::PduAssociateAc(sample_ac())).unwrap();
        assert_eq!(sm.state(), State::Sta6);

        sm.process(Event::AReleaseRequest).unwrap();
        assert_eq!(sm.state(), State::Sta7);

        sm.process(Event::PduReleaseRq).unwrap();
        assert_eq!(sm.state(), State::Sta9);

        sm.process(Event::PduReleaseRp).unwrap();
        assert_eq!(sm.state(), State::Sta11);

        let actions = sm.process(Event::AReleaseResponse).unwrap();
        assert_eq!(sm.state(), State::Sta13);
        assert_eq!(actions, vec![Action::StartArtim]);
    }

    #[test]
    fn other_release_collision_path() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        sm.process(Event::TransportConnectConfirm).unwrap();
        sm.process(Event::PduAssociateAc(sample_ac())).unwrap();

        sm.process(Event::PduReleaseRq).unwrap();
        assert_eq!(sm.state(), State::Sta8);

        sm.process(Event::AReleaseRequest).unwrap();
        assert_eq!(sm.state(), State::Sta10);

        sm.process(Event::PduReleaseRp).unwrap();
        assert_eq!(sm.state(), State::Sta12);

        let actions = sm.process(Event::AReleaseResponse).unwrap();
        assert_eq!(sm.state(), State::Sta13);
        assert!(actions.contains(&Action::StartArtim));
    }

    #[test]
    fn rejection_returns_to_idle() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        sm.process(Event::TransportConnectConfirm).unwrap();
        let actions = sm
            .process(Event::PduAssociateRj(AssociationRJ {
                result: crate::pdu::AssociationRJResult::Permanent,
                source: crate::pdu::AssociationRJSource::ServiceUser(
                    crate::pdu::AssociationRJServiceUserReason::NoReasonGiven,
                ),
            }))
            .unwrap();
        assert_eq!(sm.state(), State::Sta1);
        assert!(actions.contains(&Action::NotifyRejected));
    }

    #[test]
    fn artim_timeout_in_sta2_returns_to_idle() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::TransportConnectIndication).unwrap();
        assert_eq!(sm.state(), State::Sta2);
        let actions = sm.process(Event::ArtimTimerExpired).unwrap();
        assert_eq!(sm.state(), State::Sta1);
        assert_eq!(actions, vec![Action::CloseTransport]);
    }

    #[test]
    fn abort_from_data_transfer_returns_to_idle() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        sm.process(Event::TransportConnectConfirm).unwrap();
        sm.process(Event::PduAssociateAc(sample_ac())).unwrap();
        assert_eq!(sm.state(), State::Sta6);

        let actions = sm
            .process(Event::PduAbort(AbortRQSource::ServiceUser))
            .unwrap();
        assert_eq!(sm.state(), State::Sta1);
        assert!(matches!(actions[0], Action::StopArtim));
    }

    #[test]
    fn unexpected_event_is_a_protocol_violation() {
        let mut sm = AssociationStateMachine::new(16384);
        // P-DATA before an association exists is invalid in Sta1.
        let err = sm.process(Event::PDataRequest).unwrap_err();
        assert_eq!(err.state, State::Sta1);
    }

    #[test]
    fn max_pdu_negotiation_takes_the_minimum() {
        let mut sm = AssociationStateMachine::new(16384);
        sm.process(Event::AAssociateRequest(sample_rq())).unwrap();
        sm.process(Event::TransportConnectConfirm).unwrap();
        let mut ac = sample_ac();
        ac.user_variables
            .push(crate::pdu::UserVariableItem::MaxLength(4096));
        sm.process(Event::PduAssociateAc(ac)).unwrap();
        assert_eq!(sm.negotiated().negotiated_max_pdu, Some(4096));
    }

    #[test]
    fn sample_presentation_context_result_used() {
        let pc = PresentationContextResult {
            id: 1,
            reason: crate::pdu::PresentationContextResultReason::Acceptance,
            transfer_syntax: "1.2.840.10008.1.2".to_string(),
        };
        assert_eq!(pc.id, 1);
    }
}
