//! Association acceptor module
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::association::scp::choose_supported;
use crate::pdu::{
    reader::read_pdu, writer::write_pdu, AssociationAC, AssociationRJ, AssociationRJResult,
    AssociationRJServiceUserReason, AssociationRJSource, AssociationRQ, Pdu,
    PresentationContextResult, PresentationContextResultReason, UserVariableItem,
};
use snafu::{ensure, OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// could not bind listening socket
    Bind { source: std::io::Error },

    /// could not accept incoming connection
    Accept { source: std::io::Error },

    /// failed to receive association request
    ReceiveRequest { source: crate::pdu::reader::Error },

    /// failed to send association response
    SendResponse { source: crate::pdu::WriteError },

    #[snafu(display("unexpected request from client `{:?}`", pdu))]
    #[non_exhaustive]
    UnexpectedRequest {
        /// the PDU obtained from the client
        pdu: Pdu,
    },

    /// none of the proposed abstract syntaxes are supported by this node
    NoSupportedAbstractSyntax,

    /// failed to send PDU message
    #[non_exhaustive]
    Send { source: crate::pdu::WriteError },

    /// failed to receive PDU message
    #[non_exhaustive]
    Receive { source: crate::pdu::reader::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A DICOM association builder for a server node (acceptor).
///
/// Presentation contexts are accepted when both their abstract syntax is
/// in the configured list of `abstract_syntax_uids` and at least one of
/// the proposed transfer syntaxes is supported by
/// [`TransferSyntaxRegistry`](dicom_transfer_syntax_registry::TransferSyntaxRegistry).
/// All other proposed presentation contexts are rejected individually;
/// the association itself is only rejected outright when none of the
/// proposed contexts can be accepted.
#[derive(Debug, Clone)]
pub struct ServerAssociationOptions {
    ae_title: String,
    application_context_name: String,
    abstract_syntax_uids: Vec<String>,
    max_pdu_length: u32,
}

impl Default for ServerAssociationOptions {
    fn default() -> Self {
        ServerAssociationOptions {
            ae_title: "THIS-SCP".to_string(),
            application_context_name: "1.2.840.10008.3.1.1.1".to_string(),
            abstract_syntax_uids: Vec::new(),
            max_pdu_length: crate::pdu::reader::DEFAULT_MAX_PDU,
        }
    }
}

impl ServerAssociationOptions {
    /// Create a new set of options for accepting associations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define this node's AE title.
    pub fn ae_title(mut self, ae_title: impl Into<String>) -> Self {
        self.ae_title = ae_title.into();
        self
    }

    /// Accept presentation contexts proposing this abstract syntax.
    pub fn with_abstract_syntax(mut self, abstract_syntax_uid: impl Into<String>) -> Self {
        self.abstract_syntax_uids.push(abstract_syntax_uid.into());
        self
    }

    /// Override the maximum PDU length advertised to the requestor.
    pub fn max_pdu_length(mut self, value: u32) -> Self {
        self.max_pdu_length = value;
        self
    }

    /// Bind a listening socket and block until a single association is
    /// established, then return it.
    pub fn listen<A: ToSocketAddrs>(self, address: A) -> Result<ServerAssociation> {
        let listener = TcpListener::bind(address).context(BindSnafu)?;
        let (socket, _peer) = listener.accept().context(AcceptSnafu)?;
        self.establish(socket)
    }

    /// Negotiate an association over an already-accepted socket.
    pub fn establish(self, mut socket: TcpStream) -> Result<ServerAssociation> {
        let ServerAssociationOptions {
            ae_title,
            application_context_name,
            abstract_syntax_uids,
            max_pdu_length,
        } = self;

        let msg = read_pdu(&mut socket, max_pdu_length, true).context(ReceiveRequestSnafu)?;

        let request = match msg {
            Pdu::AssociationRQ(request) => request,
            pdu => return UnexpectedRequestSnafu { pdu }.fail(),
        };

        let AssociationRQ {
            calling_ae_title,
            presentation_contexts,
            ..
        } = request;

        let mut accepted = Vec::new();
        for pc in &presentation_contexts {
            let reason = if !abstract_syntax_uids.is_empty()
                && !abstract_syntax_uids
                    .iter()
                    .any(|uid| uid == &pc.abstract_syntax)
            {
                Some(PresentationContextResultReason::AbstractSyntaxNotSupported)
            } else if choose_supported(pc.transfer_syntaxes.iter()).is_none() {
                Some(PresentationContextResultReason::TransferSyntaxesNotSupported)
            } else {
                None
            };

            match reason {
                None => {
                    let transfer_syntax = choose_supported(pc.transfer_syntaxes.iter())
                        .expect("presence already checked above")
                        .clone();
                    accepted.push(PresentationContextResult {
                        id: pc.id,
                        reason: PresentationContextResultReason::Acceptance,
                        transfer_syntax,
                    });
                }
                Some(reason) => accepted.push(PresentationContextResult {
                    id: pc.id,
                    reason,
                    transfer_syntax: String::new(),
                }),
            }
        }

        ensure!(
            accepted
                .iter()
                .any(|pc| pc.reason == PresentationContextResultReason::Acceptance),
            NoSupportedAbstractSyntaxSnafu
        );

        let response = Pdu::AssociationAC(AssociationAC {
            protocol_version: 1,
            application_context_name,
            called_ae_title: ae_title,
            calling_ae_title,
            presentation_contexts: accepted.clone(),
            user_variables: vec![UserVariableItem::MaxLength(max_pdu_length)],
        });

        write_pdu(&mut socket, &response).context(SendResponseSnafu)?;

        let presentation_contexts = accepted
            .into_iter()
            .filter(|pc| pc.reason == PresentationContextResultReason::Acceptance)
            .collect();

        Ok(ServerAssociation {
            presentation_contexts,
            max_pdu_length,
            socket,
        })
    }

    /// Reject an incoming association request outright, without accepting
    /// the connection into a full [`ServerAssociation`].
    pub fn reject(mut socket: TcpStream, reason: AssociationRJServiceUserReason) -> Result<()> {
        let response = Pdu::AssociationRJ(AssociationRJ {
            result: AssociationRJResult::Permanent,
            source: AssociationRJSource::ServiceUser(reason),
        });
        write_pdu(&mut socket, &response).context(SendResponseSnafu)
    }
}

/// A DICOM upper level association from the perspective of an
/// association acceptor.
#[derive(Debug)]
pub struct ServerAssociation {
    /// The negotiated presentation contexts, all with `Acceptance` reason.
    presentation_contexts: Vec<PresentationContextResult>,
    /// The maximum PDU length advertised to the requestor.
    max_pdu_length: u32,
    /// The TCP stream to the other DICOM node.
    socket: TcpStream,
}

impl ServerAssociation {
    /// The presentation contexts accepted during negotiation.
    pub fn presentation_contexts(&self) -> &[PresentationContextResult] {
        &self.presentation_contexts
    }

    /// Send a PDU message to the other intervenient.
    pub fn send(&mut self, msg: &Pdu) -> Result<()> {
        write_pdu(&mut self.socket, msg).context(SendSnafu)
    }

    /// Read a PDU message from the other intervenient.
    pub fn receive(&mut self) -> Result<Pdu> {
        read_pdu(&mut self.socket, self.max_pdu_length, true).context(ReceiveSnafu)
    }

    /// Respond to a release request, or acknowledge one already pending.
    pub fn release(&mut self) -> Result<()> {
        write_pdu(&mut self.socket, &Pdu::ReleaseRP).context(SendSnafu)?;
        let _ = self.socket.shutdown(std::net::Shutdown::Both);
        Ok(())
    }
}
