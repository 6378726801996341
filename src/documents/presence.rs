//! Spec sheet of the Tuya ZG-204ZM 24G mmWave radar presence sensor.

use std::path::Path;

use crate::error::PdfBuildError;
use crate::model::FlowDocument;
use crate::story::Story;
use crate::styles::StyleSheet;

use super::{closing_footer, product_images_intro, HARDWARE_DOCUMENTATION};

pub const FILE_NAME: &str = "presence-sensor-specification.pdf";
pub const TITLE: &str = "24G MmWave Radar Human Presence Sensor";

const SAMPLE_STATE: &str = r#"{
  "battery": 100,
  "illuminance": 1528,
  "indicator": "OFF",
  "linkquality": 94,
  "motion_detection_mode": "only_pir",
  "motion_state": "small",
  "presence": true,
  "fading_time": null,
  "motion_detection_sensitivity": null,
  "static_detection_distance": null,
  "static_detection_sensitivity": null
}"#;

const SHABBAT_AUTOMATION: &str = r#"automation:
  - alias: "Presence Sensor - Pre-Shabbat Disable"
    trigger:
      - platform: state
        entity_id: binary_sensor.shabbat
        to: 'on'
    action:
      - service: mqtt.publish
        data:
          topic: "zigbee2mqtt/living_room_presence/set"
          payload: |
            {"static_detection_distance": 0,
             "static_detection_sensitivity": 0,
             "motion_detection_sensitivity": 0}

  - alias: "Presence Sensor - Post-Shabbat Enable"
    trigger:
      - platform: state
        entity_id: binary_sensor.shabbat
        to: 'off'
    action:
      - service: mqtt.publish
        data:
          topic: "zigbee2mqtt/living_room_presence/set"
          payload: |
            {"static_detection_distance": 4,
             "static_detection_sensitivity": 6,
             "motion_detection_sensitivity": 6}"#;

/// Assembles the presence sensor document from the images under `images_dir`.
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
             details for the **Tuya ZG-204ZM** 24G MmWave Radar Human Presence Sensor, commonly \
             available on AliExpress and similar platforms.",
        )?
        .spacer(10.0);

    product_images_intro(&mut story)?;
    story
        .image(
            images_dir.join("1.png"),
            5.0,
            "AliExpress listing showing 24G MmWave sensor with features",
        )?
        .image(
            images_dir.join("2.png"),
            4.0,
            "Product features: 24G Radar, PIR, Luminance, Temperature, Humidity",
        )?
        .page_break();

    story.heading("Technical Specifications").table(
        &[
            &["Parameter", "Value"],
            &["Sensor Type A", "24G Radar + PIR + Luminance + Temperature + Humidity"],
            &["Sensor Type B", "24G Radar + PIR + Luminance"],
            &["Working Voltage", "DC 3V"],
            &["Power Adapter", "USB DC 5V"],
            &["Quiescent Current", "< 65uA"],
            &["Wireless Protocol", "Zigbee 3.0 (requires Zigbee gateway)"],
            &["App Support", "Smart Life / Tuya"],
            &["Illuminance Range", "0-3500 Lux"],
            &["Battery Type", "2x LR03 AAA (not included)"],
            &["Working Temperature", "-10C to 55C"],
            &["Working Humidity", "max 95% RH"],
        ],
        &[2.0, 4.5],
    );
    story.spacer(15.0);

    story.subheading("Detection Capabilities").table(
        &[
            &["Detection Type", "Range", "Notes"],
            &["Static Detection (Radar)", "Max 3.5 meters", "Sensitivity adjustable"],
            &["Motion Detection (PIR)", "Max 5 meters", "Fixed sensitivity"],
            &["Light Value Updates", "Every 1 minute", "On change only"],
            &["Temp/Humidity Updates", "Every 15 seconds", "0.3C or 3% RH threshold"],
        ],
        &[1.8, 1.5, 3.2],
    );
    story.spacer(15.0);

    story.subheading("Important Operating Notes").numbered(&[
        "Zigbee devices must be connected to a Zigbee gateway to function",
        "After installation, align the sensing surface with the detection area",
        "For frequent false negatives, set 'Presence Keep Time' to 60+ seconds and sensitivity to 8x",
        "Low-power device - settings update only when device uploads data or is triggered",
        "When no presence detected, PIR activates first, then triggers mmWave radar for static detection",
    ])?;
    story.page_break();

    story
        .heading("Zigbee2MQTT Integration")
        .subheading("Device Identification")
        .table(
            &[
                &["Field", "Value"],
                &["Zigbee Model", "ZG-204ZM"],
                &["Manufacturer", "HOBEIAN (PIR 24Ghz human presence sensor)"],
                &["Model", "ZG-204ZM (Tuya)"],
                &["MQTT Topic", "zigbee2mqtt/[device_name]"],
            ],
            &[1.5, 5.0],
        )
        .spacer(15.0)
        .subheading("Z2M Interface Screenshots");
    story.images(
        [
            (z2m.join("1.png"), "About Tab: Device identification and MQTT topic"),
            (
                z2m.join("2.png"),
                "Exposes Tab: Presence, motion state, illuminance, and configurable parameters",
            ),
        ],
        5.5,
    )?;
    story.page_break();

    story.images(
        [
            (
                z2m.join("3.png"),
                "Exposes Tab (continued): Detection mode options - can toggle PIR/radar but not disable",
            ),
            (
                z2m.join("params.png"),
                "Full parameters view showing all configurable settings",
            ),
        ],
        5.5,
    )?;
    story.page_break();

    story.images(
        [
            (
                z2m.join("5.png"),
                "Settings Tab: Device-level settings including disable option",
            ),
            (
                z2m.join("6.png"),
                "State Tab: JSON payload showing sensor state and parameters",
            ),
        ],
        5.5,
    )?;
    story.page_break();

    story
        .heading("Configurable Parameters")
        .table(
            &[
                &["Parameter", "Range", "Unit", "Description"],
                &["Fading Time", "0-28800", "seconds", "Presence keep time"],
                &["Static Detection Distance", "0-6", "meters", "Radar detection range"],
                &["Static Detection Sensitivity", "0-10", "x", "Radar sensitivity multiplier"],
                &["Indicator", "OFF/ON", "-", "LED indicator mode"],
                &[
                    "Motion Detection Mode",
                    "only_pir / pir_and_radar / only_radar",
                    "-",
                    "Detection method",
                ],
                &["Motion Detection Sensitivity", "0-10", "x", "PIR/motion sensitivity"],
            ],
            &[1.8, 1.2, 0.6, 2.9],
        )
        .spacer(15.0)
        .subheading("Sample JSON State Payload")
        .code(SAMPLE_STATE, 8)
        .page_break();

    story.heading("Potential Shabbat Solution: Sensitivity Threshold Workaround");
    story
        .disclaimer(
            "**Disclaimer:** This is a theoretical technical approach only. It has NOT been tested \
             to confirm effectiveness, and no halachic determination has been made regarding \
             whether this approach is permissible or advisable. Consult with a qualified posek \
             before implementing any Shabbat automation strategy.",
        )?
        .spacer(10.0)
        .subheading("The Concept");
    story
        .body(
            "Since this sensor does not have a true 'disable' option, one potential workaround is \
             to set the detection thresholds to values that would effectively prevent any \
             detection from occurring.",
        )?
        .spacer(6.0);
    story
        .body(
            "**Key Observation:** The Z2M interface allows toggling between PIR and radar modes, \
             but does NOT provide an option to disable detection entirely.",
        )?
        .spacer(10.0);
    story.image(
        z2m.join("4.png"),
        5.5,
        "Annotated screenshot showing potential Shabbat solution: configure thresholds that won't be met",
    )?;

    story
        .subheading("Proposed Settings (Pre-Shabbat)")
        .table(
            &[
                &["Parameter", "Normal Value", "Shabbat Value", "Effect"],
                &["Static Detection Distance", "3-6 m", "0 m", "Radar won't detect at any distance"],
                &["Static Detection Sensitivity", "5-8x", "0x", "Radar sensitivity at minimum"],
                &["Motion Detection Sensitivity", "5-8x", "0x", "PIR sensitivity at minimum"],
            ],
            &[1.8, 1.2, 1.2, 2.3],
        )
        .spacer(15.0)
        .subheading("Sample Home Assistant Automation");
    story.body("*UNTESTED - Conceptual only*")?;
    story.code(SHABBAT_AUTOMATION, 7).page_break();

    story
        .heading("Critical Unknowns")
        .subheading("Technical Questions (Require Testing)");
    story.bullets(&[
        "Does sensitivity=0 actually prevent detection?",
        "Does distance=0 work as expected?",
        "What about the PIR sensor at minimum sensitivity?",
        "Do settings persist across power cycles?",
        "Is there latency in applying settings?",
    ])?;
    story
        .spacer(10.0)
        .subheading("Halachic Questions (Require Rabbinic Consultation)");
    story.bullets(&[
        "Is 'effectively disabled' sufficient?",
        "What if the settings don't fully prevent detection?",
        "Is pre-Shabbat automation problematic?",
        "Grama considerations if sensor is 'armed' at 0 sensitivity",
    ])?;
    story.spacer(15.0).subheading("Alternative Approaches");
    story.bullets(&[
        "**Physical switch:** Install on USB power supply for manual disconnect before Shabbat",
        "**Removable batteries:** Remove before Shabbat (impractical for multiple sensors)",
        "**Disable automations only:** If sensor state changes without resulting actions are permissible",
    ])?;

    closing_footer(&mut story);

    Ok(FlowDocument::new(TITLE, FILE_NAME, story.finish()))
}
