//! Spec sheet of the Zigbee door/window contact sensors (Aqara MCCGQ11LM, Tuya TS0203).

use std::path::Path;

use crate::error::PdfBuildError;
use crate::model::FlowDocument;
use crate::story::Story;
use crate::styles::StyleSheet;

use super::{closing_footer, product_images_intro, HARDWARE_DOCUMENTATION};

pub const FILE_NAME: &str = "door-window-sensor-specification.pdf";
pub const TITLE: &str = "Door/Window Contact Sensor (Intrusion Sensor)";

const SAMPLE_STATE: &str = r#"{
  "battery": 93,
  "battery_low": false,
  "contact": true,
  "linkquality": 131,
  "tamper": false,
  "voltage": 2600
}"#;

/// Assembles the door/window sensor document from the images under `images_dir`.
pub fn assemble(images_dir: &Path, styles: &StyleSheet) -> Result<FlowDocument, PdfBuildError> {
    let z2m = images_dir.join("z2m");
    let mut story = Story::new(styles);

    story
        .title(TITLE)
        .plain_body(HARDWARE_DOCUMENTATION)
        .spacer(20.0)
        .heading("Overview");
    story
        .body(
            "This document provides technical specifications and Zigbee2MQTT (Z2M) configuration \
             details for **Zigbee door/window contact sensors**, commonly used for intrusion \
             detection in smart home setups. The examples shown include the popular \
             **Aqara MCCGQ11LM** and similar **Tuya TS0203** models.",
        )?
        .spacer(10.0);

    product_images_intro(&mut story)?;
    story
        .image(
            images_dir.join("1.png"),
            4.5,
            "Aqara door/window sensors - works with Mi Home and Apple HomeKit",
        )?
        .image(
            images_dir.join("2.png"),
            4.5,
            "Low-Profile Mini Design: No Wiring, Installation Free, 2-Year Battery Life",
        )?
        .page_break();

    story
        .heading("Technical Specifications")
        .subheading("Aqara MCCGQ11LM")
        .table(
            &[
                &["Parameter", "Value"],
                &["Model", "MCCGQ11LM"],
                &["Battery", "CR1632 (included)"],
                &["Wireless Protocol", "Zigbee"],
                &["Dimensions", "41 x 22 x 11 mm (1.61 x 0.87 x 0.43 in.)"],
                &["Maximum Detection Distance", "22 mm"],
                &["Operating Temperature", "-10C to +45C (14F to 113F)"],
                &["Operating Humidity", "0-95% RH, non-condensing"],
                &["App Support", "Apple Home (iOS 10.3+), Aqara Home, Mi Home"],
            ],
            &[2.0, 4.5],
        )
        .spacer(15.0)
        .subheading("Tuya TS0203 (Alternative)")
        .table(
            &[
                &["Parameter", "Value"],
                &["Zigbee Model", "TS0203"],
                &["Manufacturer", "_TZ3000_oxslv1c9"],
                &["Type", "Door/window sensor"],
                &["Protocol", "Zigbee 3.0"],
            ],
            &[2.0, 4.5],
        )
        .spacer(20.0)
        .heading("Operating Principle");
    story
        .body("Door/window contact sensors use a **magnetic reed switch** mechanism:")?
        .spacer(6.0);
    story.bullets(&[
        "**Main Unit:** Contains the reed switch and Zigbee radio",
        "**Magnet:** Small magnetic piece attached to the moving part (door/window)",
        "**Detection:** When magnet is near (door closed), circuit is closed; when separated (door open), circuit opens",
        "**Detection Distance:** Typically 15-22mm maximum gap for reliable detection",
    ])?;
    story
        .spacer(10.0)
        .subheading("Sensor States")
        .table(
            &[
                &["Physical State", "Sensor Reading", "Contact Value"],
                &["Door/Window Closed", "Magnet Near", "true (Closed)"],
                &["Door/Window Open", "Magnet Far", "false (Open)"],
            ],
            &[2.0, 2.0, 2.5],
        )
        .page_break();

    story
        .heading("Zigbee2MQTT Integration")
        .subheading("Device Identification (Tuya TS0203)")
        .table(
            &[
                &["Field", "Value"],
                &["Zigbee Model", "TS0203"],
                &["Description", "Door/window sensor"],
                &["Manufacturer", "Tuya"],
                &["MQTT Topic", "zigbee2mqtt/[device_name]"],
                &["Support Status", "Supported: native"],
            ],
            &[1.5, 5.0],
        )
        .spacer(15.0)
        .subheading("Exposed Parameters")
        .table(
            &[
                &["Parameter", "Type", "Description"],
                &["Contact", "Boolean", "Indicates if contact is closed (true) or open (false)"],
                &["Battery", "Percentage", "Remaining battery (may take up to 24 hours to report)"],
                &["Voltage", "Integer (mV)", "Battery voltage in millivolts"],
                &["Tamper", "Boolean", "Indicates if device has been tampered with"],
                &["Link Quality", "Integer (lqi)", "Zigbee signal strength"],
                &["Battery Low", "Boolean", "Low battery warning flag"],
            ],
            &[1.3, 1.3, 3.9],
        )
        .spacer(15.0)
        .subheading("Sample JSON State Payload")
        .code(SAMPLE_STATE, 8)
        .page_break();

    story.heading("Z2M Interface Screenshots");
    story.images(
        [
            (
                z2m.join("2.png"),
                "About Tab: Device identification (TS0203), battery status, MQTT topic",
            ),
            (
                z2m.join("3.png"),
                "Exposes Tab: Contact state, battery %, voltage, tamper status, link quality",
            ),
        ],
        5.5,
    )?;
    story.page_break();

    story.images(
        [
            (
                z2m.join("1.png"),
                "Settings Tab: Standard Zigbee device settings (debounce, disable, filter options)",
            ),
            (
                z2m.join("4.png"),
                "Settings (Specific): Empty - no device-specific settings available",
            ),
        ],
        5.5,
    )?;
    story
        .image(
            z2m.join("5.png"),
            5.0,
            "State Tab: Raw JSON payload showing current sensor state",
        )?
        .page_break();

    story
        .heading("Halachic Considerations")
        .subheading("Key Differences from Presence Sensors");
    story
        .body(
            "Unlike mmWave/PIR presence sensors, door/window contact sensors have significant \
             differences relevant to halachic analysis:",
        )?
        .spacer(6.0);
    story.bullets(&[
        "**Passive Detection:** The sensor doesn't actively scan - it only detects the magnetic field state",
        "**Binary State:** Simple open/closed, no complex processing",
        "**No Disable Option:** Cannot be 'disabled' via software - the reed switch always responds to the magnet",
        "**Direct Physical Causation:** Opening a door directly causes the sensor state change (not grama)",
    ])?;
    story.spacer(15.0).subheading("The Core Question");
    story.body("When a person opens a door on Shabbat, and a contact sensor detects this:")?;
    story.bullets(&[
        "Is the person considered to have 'done work' by changing an electrical state?",
        "Does it matter if the sensor change triggers an automation vs. simply being logged?",
        "Is the act of opening the door (permitted) separable from the sensor detection (potentially problematic)?",
    ])?;
    story.spacer(15.0).subheading("Possible Approaches");
    story.bullets(&[
        "**Disable Automations:** Keep sensor active but disable all Shabbat automations",
        "**Physical Removal:** Remove sensor batteries before Shabbat",
        "**Z2M Disable:** Use the 'disabled' setting to exclude from network",
        "**Accept Passive Monitoring:** If no actions are triggered, some may permit passive state logging",
    ])?;
    story.spacer(6.0);
    story.disclaimer(
        "**Important:** These are technical options only. Consult a qualified posek for halachic \
         guidance.",
    )?;
    story.page_break();

    story
        .heading("Comparison: Door Sensor vs. Presence Sensor")
        .table(
            &[
                &["Aspect", "Door/Window Sensor", "Presence Sensor"],
                &["Detection Method", "Magnetic reed switch", "mmWave radar + PIR"],
                &["Active/Passive", "Passive", "Active scanning"],
                &["Configurable Sensitivity", "No", "Yes"],
                &[
                    "Can Be \"Disabled\" via Software",
                    "Only via Z2M exclusion",
                    "Potentially via threshold settings",
                ],
                &["Detection Trigger", "Physical movement of door", "Human presence/motion"],
                &["Causation Type", "Direct", "Potentially grama"],
                &["Battery Life", "2+ years", "Variable"],
            ],
            &[2.0, 2.25, 2.25],
        );

    closing_footer(&mut story);

    Ok(FlowDocument::new(TITLE, FILE_NAME, story.finish()))
}
