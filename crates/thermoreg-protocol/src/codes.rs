//! Control and command byte vocabularies.
//!
//! Both vocabularies are closed: bytes outside them are rejected at the
//! decode boundary rather than carried around as raw integers.

use crate::constants::*;
use crate::error::ProtocolError;

/// Control bytes that structure records on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlByte {
    /// Start of header. Defined by the device family, never seen on this link.
    Soh,
    /// Start of a data frame.
    Stx,
    /// End of the data portion of a data frame.
    Etx,
    /// Start of a query frame.
    Enq,
    /// Acknowledgement.
    Ack,
    /// Record terminator.
    Cr,
}

impl ControlByte {
    /// The on-wire byte value.
    pub fn code(&self) -> u8 {
        match self {
            ControlByte::Soh => CTRL_SOH,
            ControlByte::Stx => CTRL_STX,
            ControlByte::Etx => CTRL_ETX,
            ControlByte::Enq => CTRL_ENQ,
            ControlByte::Ack => CTRL_ACK,
            ControlByte::Cr => CTRL_CR,
        }
    }

    /// Whether this control byte may open a frame.
    pub fn starts_frame(&self) -> bool {
        matches!(self, ControlByte::Enq | ControlByte::Stx | ControlByte::Ack)
    }
}

impl TryFrom<u8> for ControlByte {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            CTRL_SOH => Ok(ControlByte::Soh),
            CTRL_STX => Ok(ControlByte::Stx),
            CTRL_ETX => Ok(ControlByte::Etx),
            CTRL_ENQ => Ok(ControlByte::Enq),
            CTRL_ACK => Ok(ControlByte::Ack),
            CTRL_CR => Ok(ControlByte::Cr),
            _ => Err(ProtocolError::UnrecognizedControl(byte)),
        }
    }
}

impl From<ControlByte> for u8 {
    fn from(byte: ControlByte) -> Self {
        byte.code()
    }
}

/// Command codes carried by query and data frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandByte {
    /// Write the temperature setpoint; also tags every data reply.
    SetTemperature,
    /// Read the internal temperature sensor.
    ReadInternalSensor,
    /// Read the external temperature sensor.
    ReadExternalSensor,
    /// Read the alarm status.
    ReadAlarmStatus,
    /// Write the calibration offset.
    SetOffset,
    /// Write the temperature setpoint to FRAM.
    SetTemperaturePersistent,
    /// Write the calibration offset to FRAM.
    SetOffsetPersistent,
}

impl CommandByte {
    /// The on-wire byte value.
    pub fn code(&self) -> u8 {
        match self {
            CommandByte::SetTemperature => CMD_SET_TEMPERATURE,
            CommandByte::ReadInternalSensor => CMD_READ_INTERNAL_SENSOR,
            CommandByte::ReadExternalSensor => CMD_READ_EXTERNAL_SENSOR,
            CommandByte::ReadAlarmStatus => CMD_READ_ALARM_STATUS,
            CommandByte::SetOffset => CMD_SET_OFFSET,
            CommandByte::SetTemperaturePersistent => CMD_SET_TEMPERATURE_FRAM,
            CommandByte::SetOffsetPersistent => CMD_SET_OFFSET_FRAM,
        }
    }

    /// Commands whose data-frame replies report a temperature reading.
    pub fn is_reading(&self) -> bool {
        matches!(
            self,
            CommandByte::SetTemperature | CommandByte::ReadInternalSensor
        )
    }
}

impl TryFrom<u8> for CommandByte {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            CMD_SET_TEMPERATURE => Ok(CommandByte::SetTemperature),
            CMD_READ_INTERNAL_SENSOR => Ok(CommandByte::ReadInternalSensor),
            CMD_READ_EXTERNAL_SENSOR => Ok(CommandByte::ReadExternalSensor),
            CMD_READ_ALARM_STATUS => Ok(CommandByte::ReadAlarmStatus),
            CMD_SET_OFFSET => Ok(CommandByte::SetOffset),
            CMD_SET_TEMPERATURE_FRAM => Ok(CommandByte::SetTemperaturePersistent),
            CMD_SET_OFFSET_FRAM => Ok(CommandByte::SetOffsetPersistent),
            _ => Err(ProtocolError::UnknownCommand(byte)),
        }
    }
}

impl From<CommandByte> for u8 {
    fn from(byte: CommandByte) -> Self {
        byte.code()
    }
}
