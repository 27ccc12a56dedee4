//! Human-readable summaries.

use bitwrap_sim::{binary, CollatzResult, OverflowAnalysis, SimulationResult};

/// Renders the overflow summary for a doubling simulation.
///
/// The report includes:
/// - The simulated register, start value and iteration count
/// - The overflow point, the value before it and both values at it
/// - Binary representations around the overflow
/// - Sign flip, collapse and running sum facts when present
#[must_use]
pub fn render_report(result: &SimulationResult, analysis: &OverflowAnalysis) -> String {
    let config = &result.config;
    let register = config.register;
    let mut report = String::new();

    report.push_str(&format!(
        "Doubling {} in {} over {} iterations\n",
        config.start_value, register, config.iterations
    ));

    match &analysis.divergence {
        Some(d) => {
            report.push_str(&format!("Overflow first detected at iteration {}\n", d.index));
            report.push_str(&format!("Value before overflow: {}\n", d.exact_before));
            report.push_str(&format!(
                "Value at overflow: Unlimited={}, {register}={}\n",
                d.exact, d.wrapped
            ));
            report.push_str(&format!(
                "Binary representation before overflow: {}\n",
                binary(&d.exact_before)
            ));
            report.push_str(&format!(
                "Binary representation at overflow point ({register}): {}\n",
                binary(&d.wrapped)
            ));
        }
        None => {
            report.push_str("No overflow detected in the given range of iterations\n");
            if let Some(predicted) = analysis.predicted_divergence {
                report.push_str(&format!("Overflow would occur at iteration {predicted}\n"));
            }
        }
    }

    if let Some(index) = analysis.first_negative {
        report.push_str(&format!("First negative value at iteration {index}\n"));
    }
    if let Some(index) = analysis.collapse_index {
        report.push_str(&format!("Register holds zero from iteration {index} on\n"));
    }
    if let Some(sum) = &analysis.sum_through_divergence {
        report.push_str(&format!("Sum of register values through overflow: {sum}\n"));
    }

    report
}

/// Renders a Collatz run: the register trajectory the way a C program would
/// print it, followed by how it compares to exact arithmetic.
#[must_use]
pub fn render_collatz(result: &CollatzResult) -> String {
    let register = result.register;
    let mut report = String::new();

    report.push_str(&format!(
        "Collatz trajectory of {} in {register}\n",
        result.start
    ));
    report.push_str(
        &result
            .wrapped
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    );
    report.push('\n');

    if result.exact_reached_one {
        report.push_str(&format!(
            "Exact: reached 1 after {} steps (peak {})\n",
            result.exact_steps(),
            result.exact_peak()
        ));
    } else {
        report.push_str(&format!(
            "Exact: did not reach 1 within {} steps\n",
            result.exact_steps()
        ));
    }

    match result.divergence_index {
        Some(step) => {
            report.push_str(&format!(
                "Overflow at step {step}: exact {}, {register} {}\n",
                result.exact[step], result.wrapped[step]
            ));
            let outcome = if result.wrapped_reached_one {
                "still reached 1"
            } else {
                "never reached 1"
            };
            report.push_str(&format!(
                "{register}: {outcome} after {} steps\n",
                result.wrapped.len() - 1
            ));
        }
        None => report.push_str(&format!("{register}: matches exact arithmetic\n")),
    }

    report
}
