use crate::pdu::reader::*;
use crate::pdu::writer::*;
use crate::pdu::*;
use byteordered::byteorder::WriteBytesExt;
use snafu::ResultExt;
use std::io::Cursor;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

#[test]
fn can_write_chunks_with_preceding_u32_length() -> TestResult {
    let mut bytes = vec![0u8; 0];
    write_chunk_u32(&mut bytes, |writer| {
        writer
            .write_u8(0x02)
            .context(WriteFieldSnafu { field: "test" })?;
        write_chunk_u32(writer, |writer| {
            writer
                .write_u8(0x03)
                .context(WriteFieldSnafu { field: "test" })?;
            Ok(())
        })
        .context(WriteChunkSnafu { name: "inner" })?;
        Ok(())
    })?;

    assert_eq!(bytes.len(), 10);
    assert_eq!(bytes, &[0, 0, 0, 6, 2, 0, 0, 0, 1, 3]);

    Ok(())
}

#[test]
fn can_write_chunks_with_preceding_u16_length() -> TestResult {
    let mut bytes = vec![0u8; 0];
    write_chunk_u16(&mut bytes, |writer| {
        writer
            .write_u8(0x02)
            .context(WriteFieldSnafu { field: "test" })?;
        write_chunk_u16(writer, |writer| {
            writer
                .write_u8(0x03)
                .context(WriteFieldSnafu { field: "test" })?;
            Ok(())
        })
        .context(WriteChunkSnafu { name: "inner" })?;
        Ok(())
    })?;

    assert_eq!(bytes.len(), 6);
    assert_eq!(bytes, &[0, 4, 2, 0, 1, 3]);

    Ok(())
}

#[test]
fn can_read_write_associate_rq() -> TestResult {
    let association_rq = Pdu::AssociationRQ(AssociationRQ {
        protocol_version: 2,
        calling_ae_title: "calling ae".to_string(),
        called_ae_title: "called ae".to_string(),
        application_context_name: "application context name".to_string(),
        presentation_contexts: vec![
            PresentationContextProposed {
                id: 1,
                abstract_syntax: "abstract 1".to_string(),
                transfer_syntaxes: vec!["transfer 1".to_string(), "transfer 2".to_string()],
            },
            PresentationContextProposed {
                id: 3,
                abstract_syntax: "abstract 2".to_string(),
                transfer_syntaxes: vec!["transfer 3".to_string(), "transfer 4".to_string()],
            },
        ],
        user_variables: vec![
            UserVariableItem::ImplementationClassUID("class uid".to_string()),
            UserVariableItem::ImplementationVersionName("version name".to_string()),
            UserVariableItem::MaxLength(23),
        ],
    });

    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &association_rq)?;

    let result = read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?;

    if let Pdu::AssociationRQ(AssociationRQ {
        protocol_version,
        calling_ae_title,
        called_ae_title,
        application_context_name,
        presentation_contexts,
        user_variables,
    }) = result
    {
        assert_eq!(protocol_version, 2);
        assert_eq!(calling_ae_title, "calling ae".to_string());
        assert_eq!(called_ae_title, "called ae".to_string());
        assert_eq!(
            application_context_name,
            "application context name".to_string()
        );
        assert_eq!(presentation_contexts.len(), 2);
        assert_eq!(presentation_contexts[0].abstract_syntax, "abstract 1");
        assert_eq!(presentation_contexts[0].transfer_syntaxes.len(), 2);
        assert_eq!(presentation_contexts[0].transfer_syntaxes[0], "transfer 1");
        assert_eq!(presentation_contexts[0].transfer_syntaxes[1], "transfer 2");
        assert_eq!(presentation_contexts[1].abstract_syntax, "abstract 2");
        assert_eq!(presentation_contexts[1].transfer_syntaxes.len(), 2);
        assert_eq!(presentation_contexts[1].transfer_syntaxes[0], "transfer 3");
        assert_eq!(presentation_contexts[1].transfer_syntaxes[1], "transfer 4");
        assert_eq!(user_variables.len(), 3);
        assert!(matches!(
            user_variables[0],
            UserVariableItem::ImplementationClassUID(_)
        ));
        assert!(matches!(
            user_variables[1],
            UserVariableItem::ImplementationVersionName(_)
        ));
        assert!(matches!(user_variables[2], UserVariableItem::MaxLength(_)));
    } else {
        panic!("expected AssociationRQ");
    }

    Ok(())
}

#[test]
fn can_read_write_pdata() -> TestResult {
    let pdata_rq = Pdu::PData {
        data: vec![PDataValue {
            presentation_context_id: 3,
            value_type: PDataValueType::Command,
            is_last: true,
            data: vec![0, 0, 0, 0],
        }],
    };

    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &pdata_rq)?;

    let result = read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?;

    if let Pdu::PData { data } = result {
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].presentation_context_id, 3);
        assert!(matches!(data[0].value_type, PDataValueType::Command));
        assert!(data[0].is_last);
        assert_eq!(data[0].data, vec![0, 0, 0, 0])
    } else {
        panic!("expected PData");
    }

    Ok(())
}

#[test]
fn can_read_write_association_rj() -> TestResult {
    let rj = Pdu::AssociationRJ(AssociationRJ {
        result: AssociationRJResult::Permanent,
        source: AssociationRJSource::ServiceUser(
            AssociationRJServiceUserReason::CalledAETitleNotRecognized,
        ),
    });

    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &rj)?;
    let result = read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?;

    assert_eq!(result, rj);
    Ok(())
}

#[test]
fn can_read_write_abort() -> TestResult {
    let abort = Pdu::AbortRQ {
        source: AbortRQSource::ServiceProvider(AbortRQServiceProviderReason::UnexpectedPdu),
    };

    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &abort)?;
    let result = read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?;

    assert_eq!(result, abort);
    Ok(())
}

#[test]
fn can_read_write_release() -> TestResult {
    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &Pdu::ReleaseRQ)?;
    assert_eq!(
        read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?,
        Pdu::ReleaseRQ
    );

    let mut bytes = vec![0u8; 0];
    write_pdu(&mut bytes, &Pdu::ReleaseRP)?;
    assert_eq!(
        read_pdu(&mut Cursor::new(&bytes), DEFAULT_MAX_PDU, true)?,
        Pdu::ReleaseRP
    );

    Ok(())
}
