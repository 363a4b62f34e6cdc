//! Slot booking control.

use lotwatch_api::{ApiClient, BookingFlags};

use crate::cli::{BookArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    client: &ApiClient,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = booking_flags(&args)?;

    client.book_slots(&args.device, flags).await?;
    if !global.quiet {
        if args.clear || args.slots.is_empty() {
            eprintln!("Cleared all bookings for {}", args.device);
        } else {
            eprintln!("Booked slot(s) {:?} for {}", args.slots, args.device);
        }
    }
    Ok(())
}

/// Translate CLI slot numbers into wire flags. Slots not mentioned are
/// omitted from the request, which the server reads as "not booked".
fn booking_flags(args: &BookArgs) -> Result<BookingFlags, CliError> {
    if args.clear {
        return Ok(BookingFlags::clear_all());
    }

    let mut flags = BookingFlags::clear_all();
    for &slot in &args.slots {
        match slot {
            1 => flags.slot1 = Some(true),
            2 => flags.slot2 = Some(true),
            3 => flags.slot3 = Some(true),
            4 => flags.slot4 = Some(true),
            other => {
                return Err(CliError::Validation {
                    field: "slot".into(),
                    reason: format!("slot must be 1-4, got {other}"),
                })
            }
        }
    }
    Ok(flags)
}
