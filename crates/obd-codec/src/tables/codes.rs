//! Diagnostic trouble code descriptions
//!
//! Generic SAE J2012 codes only. Manufacturer-specific codes fall through
//! to the caller's fallback text.

/// Description of a generic trouble code such as `"P0301"`
pub fn describe(code: &str) -> Option<&'static str> {
    let description = match code {
        // Fuel and air metering
        "P0100" => "Mass or Volume Air Flow Circuit Malfunction",
        "P0101" => "Mass or Volume Air Flow Circuit Range/Performance Problem",
        "P0102" => "Mass or Volume Air Flow Circuit Low Input",
        "P0103" => "Mass or Volume Air Flow Circuit High Input",
        "P0104" => "Mass or Volume Air Flow Circuit Intermittent",
        "P0105" => "Manifold Absolute Pressure/Barometric Pressure Circuit Malfunction",
        "P0106" => "Manifold Absolute Pressure/Barometric Pressure Circuit Range/Performance Problem",
        "P0107" => "Manifold Absolute Pressure/Barometric Pressure Circuit Low Input",
        "P0108" => "Manifold Absolute Pressure/Barometric Pressure Circuit High Input",
        "P0110" => "Intake Air Temperature Circuit Malfunction",
        "P0111" => "Intake Air Temperature Circuit Range/Performance Problem",
        "P0112" => "Intake Air Temperature Circuit Low Input",
        "P0113" => "Intake Air Temperature Circuit High Input",
        "P0115" => "Engine Coolant Temperature Circuit Malfunction",
        "P0116" => "Engine Coolant Temperature Circuit Range/Performance Problem",
        "P0117" => "Engine Coolant Temperature Circuit Low Input",
        "P0118" => "Engine Coolant Temperature Circuit High Input",
        "P0120" => "Throttle/Pedal Position Sensor/Switch A Circuit Malfunction",
        "P0121" => "Throttle/Pedal Position Sensor/Switch A Circuit Range/Performance Problem",
        "P0122" => "Throttle/Pedal Position Sensor/Switch A Circuit Low Input",
        "P0123" => "Throttle/Pedal Position Sensor/Switch A Circuit High Input",
        "P0125" => "Insufficient Coolant Temperature for Closed Loop Fuel Control",
        "P0128" => "Coolant Thermostat (Coolant Temperature Below Thermostat Regulating Temperature)",
        "P0130" => "O2 Sensor Circuit Malfunction (Bank 1 Sensor 1)",
        "P0131" => "O2 Sensor Circuit Low Voltage (Bank 1 Sensor 1)",
        "P0132" => "O2 Sensor Circuit High Voltage (Bank 1 Sensor 1)",
        "P0133" => "O2 Sensor Circuit Slow Response (Bank 1 Sensor 1)",
        "P0134" => "O2 Sensor Circuit No Activity Detected (Bank 1 Sensor 1)",
        "P0135" => "O2 Sensor Heater Circuit Malfunction (Bank 1 Sensor 1)",
        "P0136" => "O2 Sensor Circuit Malfunction (Bank 1 Sensor 2)",
        "P0137" => "O2 Sensor Circuit Low Voltage (Bank 1 Sensor 2)",
        "P0138" => "O2 Sensor Circuit High Voltage (Bank 1 Sensor 2)",
        "P0139" => "O2 Sensor Circuit Slow Response (Bank 1 Sensor 2)",
        "P0140" => "O2 Sensor Circuit No Activity Detected (Bank 1 Sensor 2)",
        "P0141" => "O2 Sensor Heater Circuit Malfunction (Bank 1 Sensor 2)",
        "P0150" => "O2 Sensor Circuit Malfunction (Bank 2 Sensor 1)",
        "P0151" => "O2 Sensor Circuit Low Voltage (Bank 2 Sensor 1)",
        "P0152" => "O2 Sensor Circuit High Voltage (Bank 2 Sensor 1)",
        "P0153" => "O2 Sensor Circuit Slow Response (Bank 2 Sensor 1)",
        "P0155" => "O2 Sensor Heater Circuit Malfunction (Bank 2 Sensor 1)",
        "P0170" => "Fuel Trim Malfunction (Bank 1)",
        "P0171" => "System too Lean (Bank 1)",
        "P0172" => "System too Rich (Bank 1)",
        "P0173" => "Fuel Trim Malfunction (Bank 2)",
        "P0174" => "System too Lean (Bank 2)",
        "P0175" => "System too Rich (Bank 2)",
        "P0190" => "Fuel Rail Pressure Sensor Circuit Malfunction",
        "P0191" => "Fuel Rail Pressure Sensor Circuit Range/Performance",
        "P0200" => "Injector Circuit Malfunction",
        "P0201" => "Injector Circuit Malfunction - Cylinder 1",
        "P0202" => "Injector Circuit Malfunction - Cylinder 2",
        "P0203" => "Injector Circuit Malfunction - Cylinder 3",
        "P0204" => "Injector Circuit Malfunction - Cylinder 4",
        "P0217" => "Engine Overtemp Condition",
        "P0219" => "Engine Overspeed Condition",
        "P0230" => "Fuel Pump Primary Circuit Malfunction",
        "P0234" => "Engine Overboost Condition",

        // Ignition system or misfire
        "P0300" => "Random/Multiple Cylinder Misfire Detected",
        "P0301" => "Cylinder 1 Misfire Detected",
        "P0302" => "Cylinder 2 Misfire Detected",
        "P0303" => "Cylinder 3 Misfire Detected",
        "P0304" => "Cylinder 4 Misfire Detected",
        "P0305" => "Cylinder 5 Misfire Detected",
        "P0306" => "Cylinder 6 Misfire Detected",
        "P0307" => "Cylinder 7 Misfire Detected",
        "P0308" => "Cylinder 8 Misfire Detected",
        "P0325" => "Knock Sensor 1 Circuit Malfunction (Bank 1 or Single Sensor)",
        "P0327" => "Knock Sensor 1 Circuit Low Input (Bank 1 or Single Sensor)",
        "P0335" => "Crankshaft Position Sensor A Circuit Malfunction",
        "P0336" => "Crankshaft Position Sensor A Circuit Range/Performance",
        "P0340" => "Camshaft Position Sensor Circuit Malfunction",
        "P0341" => "Camshaft Position Sensor Circuit Range/Performance",
        "P0351" => "Ignition Coil A Primary/Secondary Circuit Malfunction",
        "P0352" => "Ignition Coil B Primary/Secondary Circuit Malfunction",

        // Auxiliary emission controls
        "P0400" => "Exhaust Gas Recirculation Flow Malfunction",
        "P0401" => "Exhaust Gas Recirculation Flow Insufficient Detected",
        "P0402" => "Exhaust Gas Recirculation Flow Excessive Detected",
        "P0410" => "Secondary Air Injection System Malfunction",
        "P0411" => "Secondary Air Injection System Incorrect Flow Detected",
        "P0420" => "Catalyst System Efficiency Below Threshold (Bank 1)",
        "P0421" => "Warm Up Catalyst Efficiency Below Threshold (Bank 1)",
        "P0430" => "Catalyst System Efficiency Below Threshold (Bank 2)",
        "P0440" => "Evaporative Emission Control System Malfunction",
        "P0441" => "Evaporative Emission Control System Incorrect Purge Flow",
        "P0442" => "Evaporative Emission Control System Leak Detected (small leak)",
        "P0443" => "Evaporative Emission Control System Purge Control Valve Circuit Malfunction",
        "P0446" => "Evaporative Emission Control System Vent Control Circuit Malfunction",
        "P0449" => "Evaporative Emission Control System Vent Valve/Solenoid Circuit Malfunction",
        "P0455" => "Evaporative Emission Control System Leak Detected (gross leak)",
        "P0456" => "Evaporative Emission Control System Leak Detected (very small leak)",

        // Vehicle speed, idle control and auxiliary inputs
        "P0500" => "Vehicle Speed Sensor Malfunction",
        "P0505" => "Idle Control System Malfunction",
        "P0506" => "Idle Control System RPM Lower Than Expected",
        "P0507" => "Idle Control System RPM Higher Than Expected",
        "P0520" => "Engine Oil Pressure Sensor/Switch Circuit Malfunction",
        "P0562" => "System Voltage Low",
        "P0563" => "System Voltage High",

        // Computer output circuits
        "P0600" => "Serial Communication Link Malfunction",
        "P0601" => "Internal Control Module Memory Check Sum Error",
        "P0602" => "Control Module Programming Error",
        "P0603" => "Internal Control Module Keep Alive Memory (KAM) Error",
        "P0604" => "Internal Control Module Random Access Memory (RAM) Error",
        "P0605" => "Internal Control Module Read Only Memory (ROM) Error",
        "P0606" => "PCM Processor Fault",

        // Transmission
        "P0700" => "Transmission Control System Malfunction",
        "P0705" => "Transmission Range Sensor Circuit Malfunction (PRNDL Input)",
        "P0715" => "Input/Turbine Speed Sensor Circuit Malfunction",
        "P0720" => "Output Speed Sensor Circuit Malfunction",
        "P0730" => "Incorrect Gear Ratio",
        "P0740" => "Torque Converter Clutch Circuit Malfunction",
        "P0750" => "Shift Solenoid A Malfunction",
        "P0755" => "Shift Solenoid B Malfunction",

        // Chassis
        "C0035" => "Left Front Wheel Speed Sensor Circuit",
        "C0040" => "Right Front Wheel Speed Sensor Circuit",
        "C0045" => "Left Rear Wheel Speed Sensor Circuit",
        "C0050" => "Right Rear Wheel Speed Sensor Circuit",
        "C0123" => "Yaw Rate Sensor Circuit",

        // Body
        "B0001" => "Driver Frontal Stage 1 Deployment Control",
        "B0100" => "Electronic Frontal Sensor 1",
        "B1000" => "ECU Malfunction",

        // Network
        "U0001" => "High Speed CAN Communication Bus",
        "U0073" => "Control Module Communication Bus Off",
        "U0100" => "Lost Communication With ECM/PCM A",
        "U0101" => "Lost Communication With TCM",
        "U0121" => "Lost Communication With Anti-Lock Brake System (ABS) Control Module",
        "U0140" => "Lost Communication With Body Control Module",
        "U0155" => "Lost Communication With Instrument Panel Cluster (IPC) Control Module",
        _ => return None,
    };
    Some(description)
}
